//! Printable per-order invoice
//!
//! Text invoices are laid out in fixed-size pages separated by form feeds.
//! Every page repeats the header; the totals block always lands on the last
//! page and is never split.

use crate::models::{format_amount, Order};

const FORM_FEED: char = '\x0c';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceFormat {
    Text,
    Markdown,
}

impl InvoiceFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "txt" | "text" | "pdf" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Page geometry for text invoices
#[derive(Debug, Clone, Copy)]
pub struct InvoiceLayout {
    pub width: usize,
    pub page_lines: usize,
}

impl Default for InvoiceLayout {
    fn default() -> Self {
        Self {
            width: 48,
            page_lines: 40,
        }
    }
}

pub fn render(order: &Order, restaurant: &str, format: InvoiceFormat, layout: InvoiceLayout) -> String {
    match format {
        InvoiceFormat::Text => render_text(order, restaurant, layout),
        InvoiceFormat::Markdown => render_markdown(order, restaurant),
    }
}

fn sep(width: usize, c: char) -> String {
    c.to_string().repeat(width)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return truncate(text, width);
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(2);
    format!("{}..", text.chars().take(keep).collect::<String>())
}

/// `left` and `right` on one line, right-aligned to `width`
fn columns(left: &str, right: &str, width: usize) -> String {
    let right_len = right.chars().count();
    let left = truncate(left, width.saturating_sub(right_len + 1));
    let pad = width.saturating_sub(left.chars().count() + right_len);
    format!("{}{}{}", left, " ".repeat(pad.max(1)), right)
}

fn header(order: &Order, restaurant: &str, width: usize, page: usize, pages: usize) -> Vec<String> {
    let date = order
        .created_at
        .map(|d| d.format("%d-%m-%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    vec![
        center(restaurant, width),
        center("TAX INVOICE", width),
        sep(width, '='),
        columns(&format!("Order: {}", order.id), &format!("Page {}/{}", page, pages), width),
        truncate(&format!("Date: {}", date), width),
        truncate(&format!("Customer: {}", order.customer_name()), width),
        truncate(
            &format!(
                "Address: {}",
                order.delivery_address.as_deref().unwrap_or("-")
            ),
            width,
        ),
        sep(width, '-'),
        columns("Item", "Qty     Amount", width),
        sep(width, '-'),
    ]
}

fn item_line(name: &str, qty: u32, amount: f64, width: usize) -> String {
    let right = format!("{:>3} {:>10}", qty, format_amount(amount));
    columns(name, &right, width)
}

fn totals(order: &Order, width: usize) -> Vec<String> {
    let mut lines = vec![
        sep(width, '-'),
        columns("Sub Total", &format_amount(order.sub_total), width),
        columns("Delivery Charge", &format_amount(order.delivery_charge), width),
    ];
    if order.coupon_discount > 0.0 {
        lines.push(columns(
            "Coupon Discount",
            &format!("-{}", format_amount(order.coupon_discount)),
            width,
        ));
    }
    lines.push(sep(width, '='));
    lines.push(columns("TOTAL PAYABLE", &format_amount(order.total_payable), width));
    lines.push(truncate(
        &format!(
            "Payment: {} ({})",
            order.payment_method.as_deref().unwrap_or("-"),
            order.payment_status.as_deref().unwrap_or("-")
        ),
        width,
    ));
    lines.push(truncate(&format!("Status: {}", order.order_status), width));
    lines
}

/// Split item lines into pages, leaving room for the totals on the last one
fn paginate(items: Vec<String>, capacity: usize, footer_len: usize) -> Vec<Vec<String>> {
    let mut pages: Vec<Vec<String>> = items
        .chunks(capacity)
        .map(|chunk| chunk.to_vec())
        .collect();

    let last_fits = pages
        .last()
        .is_some_and(|last| last.len() + footer_len <= capacity);
    if !last_fits {
        pages.push(Vec::new());
    }
    pages
}

pub fn render_text(order: &Order, restaurant: &str, layout: InvoiceLayout) -> String {
    let width = layout.width.max(32);
    let footer = totals(order, width);
    let header_len = header(order, restaurant, width, 1, 1).len();
    let page_lines = layout.page_lines.max(header_len + footer.len() + 1);
    let capacity = page_lines - header_len;

    let items = order
        .products
        .iter()
        .map(|p| item_line(&p.name, p.quantity, p.line_total(), width))
        .collect();
    let pages = paginate(items, capacity, footer.len());
    let total_pages = pages.len();

    let mut rendered = Vec::with_capacity(total_pages);
    for (index, body) in pages.into_iter().enumerate() {
        let mut lines = header(order, restaurant, width, index + 1, total_pages);
        lines.extend(body);
        if index + 1 == total_pages {
            lines.extend(footer.iter().cloned());
        }
        rendered.push(lines.join("\n"));
    }

    let mut out = rendered.join(&format!("\n{}", FORM_FEED));
    out.push('\n');
    out
}

pub fn render_markdown(order: &Order, restaurant: &str) -> String {
    let mut lines = vec![
        format!("# {}", restaurant),
        String::new(),
        format!("**Invoice for order** `{}`", order.id),
        String::new(),
        format!("- Customer: {}", order.customer_name()),
        format!(
            "- Date: {}",
            order
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "- Address: {}",
            order.delivery_address.as_deref().unwrap_or("-")
        ),
        format!("- Status: {}", order.order_status),
        String::new(),
        "| Item | Qty | Price | Amount |".to_string(),
        "|------|----:|------:|-------:|".to_string(),
    ];
    for p in &order.products {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            p.name.replace('|', "\\|"),
            p.quantity,
            format_amount(p.price),
            format_amount(p.line_total())
        ));
    }
    lines.push(String::new());
    lines.push(format!("Sub total: {}  ", format_amount(order.sub_total)));
    lines.push(format!(
        "Delivery charge: {}  ",
        format_amount(order.delivery_charge)
    ));
    if order.coupon_discount > 0.0 {
        lines.push(format!(
            "Coupon discount: -{}  ",
            format_amount(order.coupon_discount)
        ));
    }
    lines.push(format!(
        "**Total payable: {}**",
        format_amount(order.total_payable)
    ));
    lines.join("\n") + "\n"
}
