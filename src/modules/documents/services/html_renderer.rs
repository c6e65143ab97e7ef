// Renders a transaction into a self-contained HTML document. The output is
// deterministic for a given context: same transaction, same number, same
// date, same bytes.

use chrono::NaiveDate;

use crate::core::money;
use crate::modules::documents::models::DocumentType;
use crate::modules::store::models::StoreProfile;
use crate::modules::transactions::models::Transaction;

/// Everything the renderer needs, borrowed from the caller
pub struct RenderContext<'a> {
    pub document_type: DocumentType,
    pub document_number: &'a str,
    pub document_date: NaiveDate,
    pub recipient_name: Option<&'a str>,
    pub custom_notes: Option<&'a str>,
    pub store: &'a StoreProfile,
    pub transaction: &'a Transaction,
}

/// Replace the five HTML metacharacters in user-supplied text.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render(ctx: &RenderContext<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} {}</title>\n",
        ctx.document_type.title(),
        escape_html(ctx.document_number)
    ));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<div class=\"document\">\n");

    push_heading(&mut html, ctx);
    push_store_block(&mut html, ctx.store);
    push_meta_block(&mut html, ctx);
    push_customer_block(&mut html, ctx.transaction);
    push_items_table(&mut html, ctx.transaction);
    push_totals_table(&mut html, ctx.transaction);
    push_notes(&mut html, ctx);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

const STYLE: &str = "<style>\n\
    body { font-family: Arial, sans-serif; font-size: 12px; color: #222; }\n\
    .document { max-width: 800px; margin: 0 auto; padding: 24px; }\n\
    h1 { font-size: 20px; margin-bottom: 0; }\n\
    .document-number { font-size: 13px; color: #555; margin-top: 2px; }\n\
    .block { margin-top: 14px; }\n\
    table { width: 100%; border-collapse: collapse; margin-top: 14px; }\n\
    th, td { border: 1px solid #999; padding: 5px 7px; text-align: left; }\n\
    td.amount, th.amount { text-align: right; }\n\
    .totals td { border: none; }\n\
    .totals .label { text-align: right; width: 80%; }\n\
    .totals .grand td { border-top: 2px solid #222; font-weight: bold; }\n\
    </style>\n";

fn push_heading(html: &mut String, ctx: &RenderContext<'_>) {
    html.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"document-number\">No. {}</p>\n",
        ctx.document_type.title(),
        escape_html(ctx.document_number)
    ));
}

fn push_store_block(html: &mut String, store: &StoreProfile) {
    html.push_str("<div class=\"block store\">\n");
    html.push_str(&format!("<strong>{}</strong><br>\n", escape_html(&store.name)));
    if let Some(address) = &store.address {
        html.push_str(&format!("{}<br>\n", escape_html(address)));
    }
    if let Some(phone) = &store.phone {
        html.push_str(&format!("Telp: {}<br>\n", escape_html(phone)));
    }
    if let Some(email) = &store.email {
        html.push_str(&format!("Email: {}<br>\n", escape_html(email)));
    }
    if let Some(npwp) = &store.npwp {
        html.push_str(&format!("NPWP: {}<br>\n", escape_html(npwp)));
    }
    html.push_str("</div>\n");
}

fn push_meta_block(html: &mut String, ctx: &RenderContext<'_>) {
    html.push_str("<div class=\"block meta\">\n");
    html.push_str(&format!(
        "Tanggal: {}<br>\n",
        ctx.document_date.format("%d-%m-%Y")
    ));
    html.push_str(&format!(
        "No. Transaksi: {}<br>\n",
        escape_html(&ctx.transaction.transaction_number)
    ));
    if let Some(recipient) = ctx.recipient_name {
        html.push_str(&format!("Penerima: {}<br>\n", escape_html(recipient)));
    }
    html.push_str("</div>\n");
}

fn push_customer_block(html: &mut String, transaction: &Transaction) {
    html.push_str("<div class=\"block customer\">\n");
    html.push_str(&format!(
        "Pelanggan: <strong>{}</strong><br>\n",
        escape_html(&transaction.customer_name)
    ));
    if let Some(address) = &transaction.customer_address {
        html.push_str(&format!("{}<br>\n", escape_html(address)));
    }
    if let Some(phone) = &transaction.customer_phone {
        html.push_str(&format!("Telp: {}<br>\n", escape_html(phone)));
    }
    if let Some(email) = &transaction.customer_email {
        html.push_str(&format!("Email: {}<br>\n", escape_html(email)));
    }
    html.push_str("</div>\n");
}

fn push_items_table(html: &mut String, transaction: &Transaction) {
    html.push_str(
        "<table class=\"items\">\n<thead>\n<tr>\
         <th>Kode</th><th>Nama</th><th class=\"amount\">Qty</th>\
         <th class=\"amount\">Harga Satuan</th><th class=\"amount\">Diskon</th>\
         <th class=\"amount\">Jumlah</th></tr>\n</thead>\n<tbody>\n",
    );
    for line in &transaction.items {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"amount\">{}</td>\
             <td class=\"amount\">{}</td><td class=\"amount\">{}%</td>\
             <td class=\"amount\">{}</td></tr>\n",
            escape_html(&line.item_code),
            escape_html(&line.item_name),
            money::format_plain(line.quantity),
            money::format_idr(line.unit_price),
            money::format_plain(line.discount_percent),
            money::format_idr(line.line_total),
        ));
    }
    html.push_str("</tbody>\n</table>\n");
}

// Only enabled taxes appear; withheld taxes show as deductions.
fn push_totals_table(html: &mut String, transaction: &Transaction) {
    html.push_str("<table class=\"totals\">\n");
    push_total_row(html, "Subtotal", &money::format_idr(transaction.subtotal));
    if transaction.ppn_enabled {
        push_total_row(html, "PPN", &money::format_idr(transaction.ppn_amount));
    }
    if transaction.regional_tax_enabled {
        push_total_row(
            html,
            "Pajak Daerah",
            &money::format_idr(transaction.regional_tax_amount),
        );
    }
    if transaction.pph22_enabled {
        push_total_row(
            html,
            "PPh 22",
            &format!("- {}", money::format_idr(transaction.pph22_amount)),
        );
    }
    if transaction.pph23_enabled {
        push_total_row(
            html,
            "PPh 23",
            &format!("- {}", money::format_idr(transaction.pph23_amount)),
        );
    }
    if transaction.stamp_duty_required {
        push_total_row(
            html,
            "Bea Materai",
            &money::format_idr(transaction.stamp_duty_amount),
        );
    }
    html.push_str(&format!(
        "<tr class=\"grand\"><td class=\"label\">Total</td><td class=\"amount\">{}</td></tr>\n",
        money::format_idr(transaction.total_amount)
    ));
    html.push_str("</table>\n");
}

fn push_total_row(html: &mut String, label: &str, amount: &str) {
    html.push_str(&format!(
        "<tr><td class=\"label\">{}</td><td class=\"amount\">{}</td></tr>\n",
        label, amount
    ));
}

fn push_notes(html: &mut String, ctx: &RenderContext<'_>) {
    if let Some(notes) = &ctx.transaction.notes {
        html.push_str(&format!(
            "<div class=\"block notes\">Catatan: {}</div>\n",
            escape_html(notes)
        ));
    }
    if let Some(custom) = ctx.custom_notes {
        html.push_str(&format!(
            "<div class=\"block notes\">{}</div>\n",
            escape_html(custom)
        ));
    }
}
