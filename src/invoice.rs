//! Invoice documents for single payments

use crate::core::format::{format_currency, format_date_time, format_short_date};
use crate::core::payment::Payment;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const ISSUER_NAME: &str = "KAMIN STUDIO";

const ISSUER_LINES: [&str; 3] = [
    "Plataforma de Pagos Corporativa",
    "Email: payment.platform@kamin.studio",
    "Tel: +57 (1) 234-5678",
];

const FOOTER_LINES: [&str; 2] = [
    "Este documento ha sido generado automáticamente por el sistema de KAMIN STUDIO.",
    "Para consultas o soporte técnico, contacte: support@kamin.studio",
];

const WIDTH: usize = 64;

/// One labelled row of the payment details table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub label: &'static str,
    pub value: String,
}

/// Printable invoice for a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub number: String,
    pub recipient: String,
    pub issued_on: String,
    pub details: Vec<InvoiceLine>,
    pub total: String,
    pub generated_at: String,
}

impl Invoice {
    /// Build the invoice for `payment`, stamped with `generated_at`
    pub fn from_payment(payment: &Payment, generated_at: DateTime<Utc>) -> Self {
        let line = |label, value| InvoiceLine { label, value };
        let amount = format_currency(payment.order_amount, &payment.currency);

        Self {
            number: payment.identification.clone(),
            recipient: payment.recipient.clone(),
            issued_on: format_short_date(payment.created_at),
            details: vec![
                line("Número de Transacción", payment.identification.clone()),
                line("Monto", amount.clone()),
                line("Estado", payment.status.label().to_string()),
                line("Método de Pago", payment.scheme.as_str().to_uppercase()),
                line("Fecha de Creación", format_short_date(payment.created_at)),
                line("Fecha de Finalización", format_short_date(payment.completed_at)),
            ],
            total: amount,
            generated_at: format_date_time(generated_at),
        }
    }

    /// Download name, e.g. `Factura-TX-2025-001-A7B9-KAMIN.txt`
    pub fn file_name(&self) -> String {
        format!("Factura-{}-KAMIN.txt", self.number)
    }

    /// Plain-text rendering, UTF-8 encoded
    pub fn render_text(&self) -> Vec<u8> {
        let rule = "=".repeat(WIDTH);
        let thin = "-".repeat(WIDTH);
        let label_width = self
            .details
            .iter()
            .map(|l| l.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = Vec::new();
        out.push(rule.clone());
        out.push(format!("FACTURA / INVOICE{:>width$}", format!("#{}", self.number), width = WIDTH - 17));
        out.push(rule.clone());
        out.push(String::new());

        out.push(ISSUER_NAME.to_string());
        out.extend(ISSUER_LINES.iter().map(|l| l.to_string()));
        out.push(String::new());

        out.push("DESTINATARIO".to_string());
        out.push(self.recipient.clone());
        out.push(format!("Fecha: {}", self.issued_on));
        out.push(String::new());

        out.push("DETALLES DEL PAGO".to_string());
        out.push(thin.clone());
        for detail in &self.details {
            let padding = label_width - detail.label.chars().count();
            out.push(format!("{}:{}  {}", detail.label, " ".repeat(padding), detail.value));
        }
        out.push(thin.clone());
        out.push(format!("TOTAL PAGADO{:>width$}", self.total, width = WIDTH - 12));
        out.push(String::new());

        out.push(thin);
        out.extend(FOOTER_LINES.iter().map(|l| l.to_string()));
        out.push(format!("Documento generado el {}", self.generated_at));
        out.push(format!("DOCUMENTO OFICIAL - {} PAYMENT PLATFORM", ISSUER_NAME));

        let mut text = out.join("\n");
        text.push('\n');
        text.into_bytes()
    }
}
