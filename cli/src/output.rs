//! Output formatting for records and order views.

use commerce_core::{OrderSummary, Product, User};
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(table(value)),
    }
}

pub fn user_line(user: &User) -> String {
    format!("{} {} {}", user.id, user.username, user.email)
}

pub fn product_line(product: &Product) -> String {
    format!("{} {} {:.2}", product.id, product.name, product.price)
}

pub fn order_line(summary: &OrderSummary) -> String {
    let items: Vec<String> = summary
        .items
        .iter()
        .map(|item| format!("{} x{}", item.product_name, item.quantity))
        .collect();
    format!(
        "{} user={} items=[{}] total={:.2}",
        summary.order.id,
        summary.order.user_id,
        items.join(", "),
        summary.total
    )
}

fn lines<T>(values: &[T], line: fn(&T) -> String) -> String {
    if values.is_empty() {
        return "(none)".to_string();
    }
    values.iter().map(line).collect::<Vec<_>>().join("\n")
}

pub fn format_user(user: &User, format: OutputFormat) -> Result<String, String> {
    render(user, format, user_line)
}

pub fn format_users(users: &[User], format: OutputFormat) -> Result<String, String> {
    render(users, format, |u| lines(u, user_line))
}

pub fn format_product(product: &Product, format: OutputFormat) -> Result<String, String> {
    render(product, format, product_line)
}

pub fn format_products(products: &[Product], format: OutputFormat) -> Result<String, String> {
    render(products, format, |p| lines(p, product_line))
}

pub fn format_order(summary: &OrderSummary, format: OutputFormat) -> Result<String, String> {
    render(summary, format, order_line)
}

pub fn format_orders(summaries: &[OrderSummary], format: OutputFormat) -> Result<String, String> {
    render(summaries, format, |o| lines(o, order_line))
}

/// Formats an order total; the table form prints two decimals.
pub fn format_total(order_id: i64, total: f64, format: OutputFormat) -> Result<String, String> {
    #[derive(Serialize)]
    struct Total {
        order_id: i64,
        total: f64,
    }
    render(&Total { order_id, total }, format, |t| format!("{:.2}", t.total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce_core::{LineItemDetail, Order};

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        }
    }

    #[test]
    fn test_table_user_omits_password() {
        let out = format_user(&alice(), OutputFormat::Table).unwrap();
        assert_eq!(out, "1 alice a@x.com");
    }

    #[test]
    fn test_json_users() {
        let out = format_users(&[alice()], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["username"], "alice");
    }

    #[test]
    fn test_empty_table_list() {
        assert_eq!(format_products(&[], OutputFormat::Table).unwrap(), "(none)");
    }

    #[test]
    fn test_order_line() {
        let summary = OrderSummary::new(
            Order { id: 4, user_id: 1 },
            vec![LineItemDetail {
                line_item_id: 1,
                product_id: 2,
                product_name: "Widget".to_string(),
                unit_price: 9.99,
                quantity: 3,
            }],
        );
        assert_eq!(
            format_order(&summary, OutputFormat::Table).unwrap(),
            "4 user=1 items=[Widget x3] total=29.97"
        );
    }

    #[test]
    fn test_total_formats() {
        assert_eq!(format_total(1, 25.5, OutputFormat::Table).unwrap(), "25.50");
        let yaml = format_total(1, 25.5, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("order_id: 1"));
        assert!(yaml.contains("total: 25.5"));
    }
}
