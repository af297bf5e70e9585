use splitbill::config::CONFIG;
use splitbill::core::models::{AuthenticatedUser, GroupImage, NewGroupForm, UserId};
use splitbill::{ApiClient, FileStorage, Router, Session};
use std::path::Path;
use tracing::info;

const USAGE: &str = "usage: splitbill <command> [args]

commands:
  login <email> <password>
  register <email> <password> <display_name>
  logout
  whoami
  users [search]
  groups
  group <group_id>
  create-group <name> [description] [group_type] [image_path]
  add-member <group_id> <user_id>
  route <path>";

fn parse_user_id(raw: &str) -> UserId {
    raw.parse::<u64>()
        .map(UserId::Numeric)
        .unwrap_or_else(|_| UserId::Text(raw.to_string()))
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn load_image(path: &str) -> Result<GroupImage, std::io::Error> {
    let path = Path::new(path);
    let bytes = tokio::fs::read(path).await?;
    Ok(GroupImage {
        file_name: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string(),
        mime_type: mime_for(path).to_string(),
        bytes,
    })
}

// The stored user outlives a run but the session cookie does not.
fn describe_stored_user(user: Option<&AuthenticatedUser>) -> String {
    match user {
        Some(user) => format!(
            "{} <{}> (id {}), stored locally; log in again in the same run before calling the Gateway",
            user.display_name, user.email, user.id
        ),
        None => "Not logged in".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter(CONFIG.log_level.as_str()).init();
    info!("Using {:?}", *CONFIG);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).map(String::as_str);

    let api = ApiClient::from_config(&CONFIG)?;
    let session = Session::init(api, FileStorage::new(&CONFIG.storage_dir)).await;

    match (arg(0), arg(1), arg(2), arg(3)) {
        (Some("login"), Some(email), Some(password), _) => {
            let user = session.sign_in(email, password).await?;
            println!("Logged in as {} <{}>", user.display_name, user.email);
        }
        (Some("register"), Some(email), Some(password), Some(display_name)) => {
            let created = session.sign_up(email, password, display_name).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        (Some("logout"), ..) => {
            session.sign_out().await;
            println!("Logged out");
        }
        (Some("whoami"), ..) => {
            println!("{}", describe_stored_user(session.current_user().await.as_ref()));
        }
        (Some("users"), search, ..) => {
            let users = match search {
                Some(term) => session.api().search_users(term).await?,
                None => session.api().fetch_users().await?,
            };
            for user in users {
                let id = user.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}", id, user.name, user.email);
            }
        }
        (Some("groups"), ..) => {
            let total = session.refresh_groups().await?;
            for group in session.groups().read().await.groups() {
                println!("{}\t{}\t{}", group.id, group.name, group.group_type);
            }
            println!("{} groups", total);
        }
        (Some("group"), Some(group_id), ..) => {
            let details = session.group_details(group_id).await?;
            if details.is_empty() {
                println!("No details for group {}", group_id);
            }
            for record in details {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
        (Some("create-group"), Some(name), description, group_type) => {
            let mut form = NewGroupForm::new(name, description.unwrap_or_default(), group_type.unwrap_or("other"));
            if let Some(path) = arg(4) {
                form = form.with_image(load_image(path).await?);
            }
            let group = session.create_group(form).await?;
            println!("Created group {} ({})", group.name, group.id);
        }
        (Some("add-member"), Some(group_id), Some(user_id), _) => {
            session.add_member(group_id, &parse_user_id(user_id)).await?;
            println!("Added {} to {}", user_id, group_id);
        }
        (Some("route"), Some(path), ..) => {
            let router = Router::new(|view| view.to_string());
            match router.visit(path) {
                Some((matched, view)) => {
                    println!("{} -> {} {:?}", matched.name, view, matched.params);
                }
                None => println!("No route for {}", path),
            }
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
