//! 列表/表单视图
//!
//! 所有状态变更都经过 [`ListView::update`]。保存和删除之后总是重新拉取整个列表，
//! 不把服务端响应合并进本地状态。

use tracing::{error, warn};

use super::category::CategoryIndex;
use super::form::FormState;
use super::interaction::Interaction;
use super::page::{render_form, render_table, RecordPage};
use super::scope::{RequestTicket, ViewScope};
use crate::app::category::Category;
use crate::client::{ClientError, ResourceApi};
use crate::core::resource::RecordId;

#[derive(Debug, Clone, PartialEq)]
pub enum ListMsg {
    Refresh,
    SetField { name: String, value: String },
    Submit,
    Edit(RecordId),
    CancelEdit,
    Delete(RecordId),
}

impl ListMsg {
    pub fn set_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        ListMsg::SetField {
            name: name.into(),
            value: value.into(),
        }
    }
}

pub struct ListView<R: RecordPage, A: ResourceApi<R>> {
    api: A,
    items: Vec<R>,
    edit_target: Option<RecordId>,
    form: FormState,
    categories: CategoryIndex,
    scope: ViewScope,
}

impl<R: RecordPage, A: ResourceApi<R>> ListView<R, A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            edit_target: None,
            form: FormState::empty::<R>(),
            categories: CategoryIndex::default(),
            scope: ViewScope::new(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn edit_target(&self) -> Option<RecordId> {
        self.edit_target
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// 挂载时加载一次分类，供引用字段显示名称
    pub async fn load_categories(&mut self, api: &dyn ResourceApi<Category>) {
        let result = self.scope.run(api.list()).await;
        match result {
            Some(Ok(categories)) => self.categories = CategoryIndex::new(categories),
            Some(Err(err)) => error!("Failed to fetch categories: {}", err),
            None => {}
        }
    }

    pub async fn update(&mut self, msg: ListMsg, ui: &dyn Interaction) {
        if self.scope.is_closed() {
            return;
        }
        match msg {
            ListMsg::Refresh => self.refresh().await,
            ListMsg::SetField { name, value } => {
                if !self.form.set(&name, value) {
                    warn!(collection = R::COLLECTION, field = %name, "未知表单字段");
                }
            }
            ListMsg::Submit => self.save(ui).await,
            ListMsg::Edit(id) => self.enter_edit(id, ui),
            ListMsg::CancelEdit => self.exit_edit(),
            ListMsg::Delete(id) => self.remove(id, ui).await,
        }
    }

    /// 发出刷新票据，配合 [`ListView::apply_refresh`] 在别处执行请求
    ///
    /// 供宿主在视图之外并发拉取列表；`update` 内部的刷新持有 `&mut self`，票据总是最新的。
    pub fn issue_refresh(&mut self) -> RequestTicket {
        self.scope.issue()
    }

    /// 应用刷新结果，过期票据的结果被丢弃并返回 `false`
    pub fn apply_refresh(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<R>, ClientError>,
    ) -> bool {
        if !self.scope.accepts(ticket) {
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(err) => {
                error!("Failed to fetch {}: {}", R::COLLECTION, err);
                false
            }
        }
    }

    async fn refresh(&mut self) {
        let ticket = self.issue_refresh();
        let Some(result) = self.scope.run(self.api.list()).await else {
            return;
        };
        self.apply_refresh(ticket, result);
    }

    async fn save(&mut self, ui: &dyn Interaction) {
        let body = match self.form.to_body() {
            Ok(body) => body,
            Err(err) => {
                ui.alert(&err.to_string());
                return;
            }
        };

        let request = async {
            match self.edit_target {
                Some(id) => self.api.replace(id, &body).await,
                None => self.api.create(&body).await,
            }
        };
        let Some(result) = self.scope.run(request).await else {
            return;
        };

        match result {
            Ok(_) => {
                // 新增后表单保留输入，便于连续录入相似记录
                if self.edit_target.is_some() {
                    self.exit_edit();
                }
                self.refresh().await;
            }
            Err(err) => {
                error!("Failed to save {}: {}", R::COLLECTION, err);
                ui.alert(&format!("Failed to save {}", R::COLLECTION));
            }
        }
    }

    async fn remove(&mut self, id: RecordId, ui: &dyn Interaction) {
        if !ui.confirm(R::DELETE_QUESTION) {
            return;
        }
        let Some(result) = self.scope.run(self.api.delete(id)).await else {
            return;
        };
        if let Err(err) = result {
            error!("Failed to delete {} {}: {}", R::COLLECTION, id, err);
            ui.alert(&format!("Failed to delete {}", R::COLLECTION));
        }
        if self.edit_target == Some(id) {
            self.exit_edit();
        }
        self.refresh().await;
    }

    fn enter_edit(&mut self, id: RecordId, ui: &dyn Interaction) {
        match self.items.iter().find(|item| item.id() == id) {
            Some(record) => {
                self.form = FormState::bind(record);
                self.edit_target = Some(id);
            }
            None => ui.alert(&R::not_found_message()),
        }
    }

    fn exit_edit(&mut self) {
        self.form = FormState::empty::<R>();
        self.edit_target = None;
    }

    pub fn render(&self) -> String {
        let mut out = render_form::<R>(&self.form, self.edit_target.is_some(), &self.categories);
        out.push('\n');
        out.push_str(&render_table(&self.items, &self.categories));
        out
    }

    /// 关闭视图，进行中的请求结果将被丢弃
    pub fn close(&self) {
        self.scope.close();
    }
}
