//! # Line Shell
//!
//! The text protocol of the `register` binary: one request per line in,
//! one JSON document per line out.
//!
//! ```text
//! catalog                     search <term>
//! add <variant-id>            remove <variant-id>
//! promotions                  promo <promotion-id|none>
//! customer <name> [phone]     cart
//! clear                       checkout
//! report [YYYY-MM-DD]         sale <sale-id>
//! login <email> <password>    logout
//! whoami                      help
//! quit
//! ```
//!
//! Replies are `{"ok": ...}` or `{"error": {"code": ..., "message": ...}}`.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::commands;
use crate::error::ApiError;
use crate::state::{ConfigState, SaleState, Services, SessionState};

const HELP: &str = "catalog | search <term> | add <variant-id> | remove <variant-id> | \
promotions | promo <promotion-id|none> | customer <name> [phone] | cart | clear | \
checkout | report [YYYY-MM-DD] | sale <sale-id> | login <email> <password> | logout | \
whoami | quit";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Catalog,
    Search(String),
    Add(String),
    Remove(String),
    Promotions,
    Promo(Option<String>),
    Customer { name: String, phone: Option<String> },
    Cart,
    Clear,
    Checkout,
    Report(Option<NaiveDate>),
    Sale(String),
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    Help,
    Quit,
}

fn looks_like_phone(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')'))
}

fn one_arg(command: &str, rest: &str) -> Result<String, ApiError> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [arg] => Ok((*arg).to_string()),
        _ => Err(ApiError::validation(format!("usage: {} <id>", command))),
    }
}

impl FromStr for Request {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command.to_lowercase().as_str() {
            "catalog" => Ok(Request::Catalog),
            "search" => Ok(Request::Search(rest.to_string())),
            "add" => one_arg("add", rest).map(Request::Add),
            "remove" => one_arg("remove", rest).map(Request::Remove),
            "promotions" => Ok(Request::Promotions),
            "promo" => {
                let id = one_arg("promo", rest)?;
                Ok(Request::Promo(Some(id).filter(|id| id != "none")))
            }
            "customer" => {
                // Trailing phone-like tokens form the phone, the rest is the name.
                let tokens: Vec<&str> = rest.split_whitespace().collect();
                let split = tokens
                    .iter()
                    .rposition(|t| !looks_like_phone(t))
                    .map_or(1, |last_name_token| last_name_token + 1)
                    .min(tokens.len());
                let (name, phone) = tokens.split_at(split);
                Ok(Request::Customer {
                    name: name.join(" "),
                    phone: Some(phone.join(" ")).filter(|p| !p.is_empty()),
                })
            }
            "cart" => Ok(Request::Cart),
            "clear" => Ok(Request::Clear),
            "checkout" => Ok(Request::Checkout),
            "report" if rest.is_empty() => Ok(Request::Report(None)),
            "report" => NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .map(|date| Request::Report(Some(date)))
                .map_err(|_| ApiError::validation("usage: report [YYYY-MM-DD]")),
            "sale" => one_arg("sale", rest).map(Request::Sale),
            "login" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
                [email, password] => Ok(Request::Login {
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                }),
                _ => Err(ApiError::validation("usage: login <email> <password>")),
            },
            "logout" => Ok(Request::Logout),
            "whoami" => Ok(Request::WhoAmI),
            "help" | "?" => Ok(Request::Help),
            "quit" | "exit" => Ok(Request::Quit),
            other => Err(ApiError::validation(format!(
                "unknown command '{}', try 'help'",
                other
            ))),
        }
    }
}

/// All register state, for a driver that dispatches every command.
#[derive(Debug, Clone)]
pub struct Register {
    pub services: Services,
    pub sale: SaleState,
    pub session: SessionState,
    pub config: ConfigState,
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to serialize response: {}", e);
        ApiError::internal("Failed to serialize response")
    })
}

impl Register {
    pub fn new(config: ConfigState, services: Services) -> Self {
        Register {
            services,
            sale: SaleState::new(),
            session: SessionState::new(),
            config,
        }
    }

    /// Runs one request against the command functions.
    pub async fn handle(&self, request: Request) -> Result<Value, ApiError> {
        let (services, sale, session, config) =
            (&self.services, &self.sale, &self.session, &self.config);

        match request {
            Request::Catalog => to_json(commands::list_catalog(services, config).await?),
            Request::Search(term) => {
                to_json(commands::search_catalog(services, config, &term).await?)
            }
            Request::Add(id) => to_json(commands::add_to_cart(services, sale, config, &id).await?),
            Request::Remove(id) => to_json(commands::remove_from_cart(sale, config, &id)),
            Request::Promotions => to_json(commands::list_active_promotions(services).await?),
            Request::Promo(id) => {
                to_json(commands::set_promotion(services, sale, config, id.as_deref()).await?)
            }
            Request::Customer { name, phone } => {
                to_json(commands::set_customer(sale, config, &name, phone.as_deref()))
            }
            Request::Cart => to_json(commands::get_cart(sale, config)),
            Request::Clear => to_json(commands::clear_cart(sale, config)),
            Request::Checkout => {
                to_json(commands::finalize_sale(services, sale, session, config).await?)
            }
            Request::Report(date) => {
                to_json(commands::daily_report(services, config, date).await?)
            }
            Request::Sale(id) => to_json(commands::get_sale(services, &id).await?),
            Request::Login { email, password } => {
                to_json(commands::sign_in(services, session, &email, &password).await?)
            }
            Request::Logout => to_json(commands::sign_out(services, session).await?),
            Request::WhoAmI => to_json(commands::current_user(services).await?),
            Request::Help => Ok(json!(HELP)),
            Request::Quit => Ok(Value::Null),
        }
    }

    /// Parses and runs one line, producing the reply document.
    pub async fn reply(&self, line: &str) -> Value {
        let result = match line.parse::<Request>() {
            Ok(request) => self.handle(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => json!({ "ok": value }),
            Err(e) => json!({ "error": e }),
        }
    }
}
