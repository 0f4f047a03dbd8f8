//! 详情视图
//!
//! 只读。加载失败时提示并返回列表页；编辑入口同样跳回列表页，在那里编辑。

use tracing::{error, warn};

use super::category::CategoryIndex;
use super::interaction::Interaction;
use super::page::{render_details, RecordPage};
use super::scope::ViewScope;
use super::Navigation;
use crate::app::category::Category;
use crate::client::ResourceApi;
use crate::core::resource::RecordId;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<R> {
    Loading,
    Loaded { record: R, categories: CategoryIndex },
    Failed,
}

pub struct DetailView<R: RecordPage> {
    id: RecordId,
    state: DetailState<R>,
    scope: ViewScope,
}

impl<R: RecordPage> DetailView<R> {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            scope: ViewScope::new(),
        }
    }

    pub fn state(&self) -> &DetailState<R> {
        &self.state
    }

    /// 拉取记录；记录引用分类且提供了分类 API 时一并解析分类名称
    pub async fn load(
        &mut self,
        api: &dyn ResourceApi<R>,
        categories: Option<&dyn ResourceApi<Category>>,
        ui: &dyn Interaction,
    ) -> Navigation {
        let Some(result) = self.scope.run(api.get(self.id)).await else {
            return Navigation::Stay;
        };
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                error!("Failed to fetch {} {}: {}", R::COLLECTION, self.id, err);
                ui.alert(&format!("Failed to fetch {}", R::COLLECTION));
                self.state = DetailState::Failed;
                return Navigation::List(R::COLLECTION);
            }
        };

        let mut index = CategoryIndex::default();
        if let (Some(category_id), Some(categories)) = (record.category_ref(), categories) {
            match self.scope.run(categories.get(category_id)).await {
                Some(Ok(category)) => index = CategoryIndex::new(vec![category]),
                Some(Err(err)) if err.is_not_found() => {
                    warn!(product = %self.id, category = %category_id, "分类引用悬空");
                }
                Some(Err(err)) => error!("Failed to fetch category {}: {}", category_id, err),
                None => return Navigation::Stay,
            }
        }

        self.state = DetailState::Loaded {
            record,
            categories: index,
        };
        Navigation::Stay
    }

    /// 编辑在列表页进行
    pub fn edit(&self) -> Navigation {
        Navigation::List(R::COLLECTION)
    }

    pub fn render(&self) -> String {
        match &self.state {
            DetailState::Loading => "Loading...\n".to_string(),
            DetailState::Loaded { record, categories } => render_details(record, categories),
            DetailState::Failed => String::new(),
        }
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
