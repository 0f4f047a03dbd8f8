use std::sync::Mutex;

use serde_json::json;
use stock::app::{build_router, category::Category, customer::Customer, product::Product, AppState};
use stock::client::{ClientError, HttpResourceClient, ResourceApi};
use stock::config::HttpConfig;
use stock::core::RecordId;
use stock::views::{DetailState, DetailView, Interaction, ListMsg, ListView, Navigation};
use tokio::net::TcpListener;

/// 启动一个内存存储的服务器，返回 API 根地址
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(AppState::in_memory(), &HttpConfig::default());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// 记录提示并按预设回答确认框
struct Recorder {
    answer: bool,
    questions: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl Recorder {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            questions: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Interaction for Recorder {
    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

async fn fill_customer(view: &mut ListView<Customer, HttpResourceClient<Customer>>, ui: &Recorder) {
    for (name, value) in [
        ("name", "Ann"),
        ("dateOfBirth", "1990-01-01"),
        ("memberNumber", "7"),
        ("interests", "chess"),
    ] {
        view.update(ListMsg::set_field(name, value), ui).await;
    }
}

#[tokio::test]
async fn test_client_crud_round_trip() {
    let base = spawn_server().await;
    let client = HttpResourceClient::<Category>::new(&base);

    let drinks = client.create(&json!({ "name": "Drinks" })).await.unwrap();
    assert_eq!(client.get(drinks.id).await.unwrap(), drinks);

    let renamed = client
        .replace(drinks.id, &json!({ "name": "Beverages" }))
        .await
        .unwrap();
    assert_eq!(renamed.id, drinks.id);
    assert_eq!(client.list().await.unwrap(), vec![renamed]);

    let confirmation = client.delete(drinks.id).await.unwrap();
    assert_eq!(confirmation.message, "Category deleted successfully");
    assert!(client.get(drinks.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_client_error_taxonomy() {
    let base = spawn_server().await;
    let client = HttpResourceClient::<Customer>::new(&base);

    match client.delete(RecordId::generate()).await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Customer not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    match client.create(&json!({ "name": "Ann" })).await {
        Err(ClientError::Rejected { status, .. }) => assert_eq!(status, 400),
        other => panic!("expected Rejected, got {:?}", other),
    }

    // 先占用再释放端口，得到一个没有服务监听的地址
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let offline = HttpResourceClient::<Customer>::new(&format!("http://{}/api", addr));
    assert!(matches!(offline.list().await, Err(ClientError::Network(_))));
}

#[tokio::test]
async fn test_list_view_create_and_edit() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let mut view = ListView::new(HttpResourceClient::<Customer>::new(&base));
    view.update(ListMsg::Refresh, &ui).await;
    assert!(view.items().is_empty());
    assert!(view.render().contains("No customers found."));

    fill_customer(&mut view, &ui).await;
    view.update(ListMsg::Submit, &ui).await;
    assert_eq!(view.items().len(), 1);
    let ann = view.items()[0].clone();
    assert_eq!(ann.member_number, 7);

    view.update(ListMsg::Edit(ann.id), &ui).await;
    assert_eq!(view.edit_target(), Some(ann.id));
    assert_eq!(view.form().value("dateOfBirth"), "1990-01-01");
    assert!(view.render().starts_with("[Edit Customer]"));

    view.update(ListMsg::set_field("memberNumber", "8"), &ui).await;
    view.update(ListMsg::Submit, &ui).await;

    assert_eq!(view.edit_target(), None);
    assert_eq!(view.form().value("name"), "");
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].id, ann.id);
    assert_eq!(view.items()[0].member_number, 8);
    assert!(ui.alerts().is_empty());
}

#[tokio::test]
async fn test_list_view_required_fields_block_submit() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let mut view = ListView::new(HttpResourceClient::<Customer>::new(&base));

    view.update(ListMsg::set_field("name", "Ann"), &ui).await;
    view.update(ListMsg::Submit, &ui).await;

    assert_eq!(
        ui.alerts(),
        vec!["Please fill in: Date of Birth, Member Number, Interests".to_string()]
    );
    assert_eq!(view.form().value("name"), "Ann");
    view.update(ListMsg::Refresh, &ui).await;
    assert!(view.items().is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_form_populated() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let client = HttpResourceClient::<Customer>::new(&base);
    let mut view = ListView::new(client.clone());

    fill_customer(&mut view, &ui).await;
    view.update(ListMsg::Submit, &ui).await;
    let ann = view.items()[0].clone();

    view.update(ListMsg::Edit(ann.id), &ui).await;
    // 另一个会话先删掉了这条记录
    client.delete(ann.id).await.unwrap();
    view.update(ListMsg::set_field("interests", "go"), &ui).await;
    view.update(ListMsg::Submit, &ui).await;

    assert_eq!(ui.alerts(), vec!["Failed to save customer".to_string()]);
    assert_eq!(view.edit_target(), Some(ann.id));
    assert_eq!(view.form().value("interests"), "go");
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let base = spawn_server().await;
    let declining = Recorder::answering(false);
    let mut view = ListView::new(HttpResourceClient::<Customer>::new(&base));
    fill_customer(&mut view, &declining).await;
    view.update(ListMsg::Submit, &declining).await;
    let ann = view.items()[0].id;

    view.update(ListMsg::Delete(ann), &declining).await;
    assert_eq!(view.items().len(), 1);
    assert_eq!(
        declining.questions.lock().unwrap().as_slice(),
        ["Are you sure you want to delete this customer?".to_string()]
    );

    let accepting = Recorder::answering(true);
    view.update(ListMsg::Delete(ann), &accepting).await;
    assert!(view.items().is_empty());

    view.update(ListMsg::Delete(ann), &accepting).await;
    assert_eq!(accepting.alerts(), vec!["Failed to delete customer".to_string()]);
    assert!(view.items().is_empty());
}

#[tokio::test]
async fn test_product_rows_resolve_categories_and_tolerate_dangling() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let categories = HttpResourceClient::<Category>::new(&base);
    let drinks = categories.create(&json!({ "name": "Drinks" })).await.unwrap();

    let mut view = ListView::new(HttpResourceClient::<Product>::new(&base));
    view.load_categories(&categories).await;
    view.update(ListMsg::Refresh, &ui).await;
    for (name, value) in [
        ("code", "P-1".to_string()),
        ("name", "Tea".to_string()),
        ("description", "Green tea".to_string()),
        ("price", "10".to_string()),
        ("category", drinks.id.to_string()),
    ] {
        view.update(ListMsg::set_field(name, value), &ui).await;
    }
    view.update(ListMsg::Submit, &ui).await;

    assert_eq!(view.items().len(), 1);
    assert!(view.render().contains("Drinks"));

    categories.delete(drinks.id).await.unwrap();
    let mut remounted = ListView::new(HttpResourceClient::<Product>::new(&base));
    remounted.load_categories(&categories).await;
    remounted.update(ListMsg::Refresh, &ui).await;

    let table = remounted.render();
    let row = table.lines().last().unwrap();
    assert!(row.contains("Tea"));
    assert!(row.ends_with("Unknown"));
}

#[tokio::test]
async fn test_stale_refresh_is_discarded() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let client = HttpResourceClient::<Category>::new(&base);
    let mut view = ListView::new(client.clone());

    let stale = view.issue_refresh();
    let stale_result = client.list().await;

    client.create(&json!({ "name": "Drinks" })).await.unwrap();
    let fresh = view.issue_refresh();
    assert!(view.apply_refresh(fresh, client.list().await));
    assert_eq!(view.items().len(), 1);

    assert!(!view.apply_refresh(stale, stale_result));
    assert_eq!(view.items().len(), 1);

    view.close();
    view.update(ListMsg::Refresh, &ui).await;
    assert_eq!(view.items().len(), 1);
}

#[tokio::test]
async fn test_detail_view_missing_record_navigates_back() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let client = HttpResourceClient::<Customer>::new(&base);

    let mut view = DetailView::<Customer>::new(RecordId::generate());
    assert_eq!(view.render(), "Loading...\n");

    let navigation = view.load(&client, None, &ui).await;
    assert_eq!(navigation, Navigation::List("customer"));
    assert_eq!(view.state(), &DetailState::Failed);
    assert_eq!(ui.alerts(), vec!["Failed to fetch customer".to_string()]);
}

#[tokio::test]
async fn test_product_detail_resolves_category() {
    let base = spawn_server().await;
    let ui = Recorder::answering(true);
    let categories = HttpResourceClient::<Category>::new(&base);
    let products = HttpResourceClient::<Product>::new(&base);

    let drinks = categories.create(&json!({ "name": "Drinks" })).await.unwrap();
    let tea = products
        .create(&json!({
            "code": "P-1",
            "name": "Tea",
            "description": "Green tea",
            "price": 10,
            "category": drinks.id.to_string()
        }))
        .await
        .unwrap();

    let mut view = DetailView::<Product>::new(tea.id);
    assert_eq!(view.load(&products, Some(&categories), &ui).await, Navigation::Stay);
    let page = view.render();
    assert!(page.contains("Price: 10 Baht"));
    assert!(page.contains("Category: Drinks"));
    assert_eq!(view.edit(), Navigation::List("product"));

    categories.delete(drinks.id).await.unwrap();
    let mut view = DetailView::<Product>::new(tea.id);
    view.load(&products, Some(&categories), &ui).await;
    assert!(view.render().contains("Category: No category"));
    assert!(ui.alerts().is_empty());
}
