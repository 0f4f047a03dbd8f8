//! 终端前端
//!
//! 用列表/表单视图和详情视图浏览、编辑服务器上的资源。
//! API 地址取自配置文件的 `client.api_base` 或环境变量 `STOCK_API_URL`。

use std::io::{self, BufRead, Write};

use stock::app::{category::Category, customer::Customer, product::Product};
use stock::client::HttpResourceClient;
use stock::config::load_config;
use stock::core::RecordId;
use stock::infrastructure::logger::Logger;
use stock::views::{page::RecordPage, DetailView, Interaction, ListMsg, ListView, Navigation};
use tracing::info;

/// 标准输入输出上的确认框和提示框
struct Terminal;

impl Interaction for Terminal {
    fn confirm(&self, question: &str) -> bool {
        print!("{} [y/N] ", question);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    fn alert(&self, message: &str) {
        println!("⚠️  {}", message);
    }
}

struct Clients {
    customers: HttpResourceClient<Customer>,
    products: HttpResourceClient<Product>,
    categories: HttpResourceClient<Category>,
}

enum Page {
    Home,
    Customers(ListView<Customer, HttpResourceClient<Customer>>),
    Products(ListView<Product, HttpResourceClient<Product>>),
    Categories(ListView<Category, HttpResourceClient<Category>>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    let http = reqwest::Client::new();
    let api_base = config.client.api_base.as_str();
    let clients = Clients {
        customers: HttpResourceClient::with_client(http.clone(), api_base),
        products: HttpResourceClient::with_client(http.clone(), api_base),
        categories: HttpResourceClient::with_client(http, api_base),
    };
    info!("API 地址: {}", api_base);

    let ui = Terminal;
    let mut page = Page::Home;
    print_home();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "home" => {
                close(&page);
                page = Page::Home;
                print_home();
            }
            "open" => match open(rest, &clients, &ui).await {
                Some(next) => {
                    close(&page);
                    page = next;
                    render(&page);
                }
                None => println!("未知资源: {}", rest),
            },
            "show" => match rest.parse::<RecordId>() {
                Ok(id) => {
                    if let Some(next) = show(&page, id, &clients, &ui).await {
                        close(&page);
                        page = next;
                        render(&page);
                    }
                }
                Err(_) => println!("无效的 id: {}", rest),
            },
            _ => match list_message(command, rest) {
                Some(msg) => {
                    dispatch(&mut page, msg, &ui).await;
                    render(&page);
                }
                None => println!("无法识别的命令，输入 help 查看帮助"),
            },
        }
    }

    close(&page);
    Ok(())
}

fn list_message(command: &str, rest: &str) -> Option<ListMsg> {
    match command {
        "refresh" => Some(ListMsg::Refresh),
        "set" => {
            let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
            Some(ListMsg::set_field(name, value.trim()))
        }
        "submit" => Some(ListMsg::Submit),
        "cancel" => Some(ListMsg::CancelEdit),
        "edit" => rest.parse().ok().map(ListMsg::Edit),
        "delete" => rest.parse().ok().map(ListMsg::Delete),
        _ => None,
    }
}

async fn open(name: &str, clients: &Clients, ui: &Terminal) -> Option<Page> {
    let page = match name {
        "customer" | "customers" => {
            let mut view = ListView::new(clients.customers.clone());
            view.update(ListMsg::Refresh, ui).await;
            Page::Customers(view)
        }
        "product" | "products" => {
            let mut view = ListView::new(clients.products.clone());
            view.load_categories(&clients.categories).await;
            view.update(ListMsg::Refresh, ui).await;
            Page::Products(view)
        }
        "category" | "categories" => {
            let mut view = ListView::new(clients.categories.clone());
            view.update(ListMsg::Refresh, ui).await;
            Page::Categories(view)
        }
        _ => return None,
    };
    Some(page)
}

/// 显示详情；加载失败时按视图返回的跳转回到列表页
async fn show(page: &Page, id: RecordId, clients: &Clients, ui: &Terminal) -> Option<Page> {
    let navigation = match page {
        Page::Home => {
            println!("请先打开一个列表页");
            return None;
        }
        Page::Customers(_) => {
            print_detail(DetailView::<Customer>::new(id), &clients.customers, None, ui).await
        }
        Page::Products(_) => {
            print_detail(
                DetailView::<Product>::new(id),
                &clients.products,
                Some(&clients.categories),
                ui,
            )
            .await
        }
        Page::Categories(_) => {
            print_detail(DetailView::<Category>::new(id), &clients.categories, None, ui).await
        }
    };

    match navigation {
        Navigation::Stay => None,
        Navigation::List(collection) => open(collection, clients, ui).await,
    }
}

async fn print_detail<R: RecordPage>(
    mut view: DetailView<R>,
    api: &HttpResourceClient<R>,
    categories: Option<&HttpResourceClient<Category>>,
    ui: &Terminal,
) -> Navigation {
    let categories = categories.map(|c| c as &dyn stock::client::ResourceApi<Category>);
    let navigation = view.load(api, categories, ui).await;
    if navigation == Navigation::Stay {
        print!("{}", view.render());
        println!("(edit 请在列表页进行: edit <id>)");
    }
    navigation
}

async fn dispatch(page: &mut Page, msg: ListMsg, ui: &Terminal) {
    match page {
        Page::Home => println!("请先打开一个列表页: open customer | product | category"),
        Page::Customers(view) => view.update(msg, ui).await,
        Page::Products(view) => view.update(msg, ui).await,
        Page::Categories(view) => view.update(msg, ui).await,
    }
}

fn render(page: &Page) {
    match page {
        Page::Home => print_home(),
        Page::Customers(view) => print!("{}", view.render()),
        Page::Products(view) => print!("{}", view.render()),
        Page::Categories(view) => print!("{}", view.render()),
    }
}

fn close(page: &Page) {
    match page {
        Page::Home => {}
        Page::Customers(view) => view.close(),
        Page::Products(view) => view.close(),
        Page::Categories(view) => view.close(),
    }
}

fn print_home() {
    println!("Stock Management");
    println!("  - Products  (open product)");
    println!("  - Category  (open category)");
    println!("  - Customer  (open customer)");
}

fn print_help() {
    println!("命令:");
    println!("  open <customer|product|category>  打开列表页");
    println!("  set <field> <value>               填写表单字段");
    println!("  submit                            新增或更新");
    println!("  edit <id> / cancel                进入 / 退出编辑");
    println!("  delete <id>                       删除记录");
    println!("  show <id>                         查看详情");
    println!("  refresh / home / quit");
}
