//! Shared HTML building blocks for rendered pages.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

pub const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

// Card styles
pub const CARD_STYLE: &str = "bg-gray-700 p-4 rounded-lg mb-6 w-full max-w-lg mx-auto";
pub const CARD_HEADER_STYLE: &str = "text-xl font-medium mb-4 text-center";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "p-2";
pub const TABLE_ROW_STYLE: &str = "border-t border-gray-600";
pub const TABLE_CELL_STYLE: &str = "p-2";

// Amount colours
pub const POSITIVE_TEXT_STYLE: &str = "text-green-400";
pub const NEGATIVE_TEXT_STYLE: &str = "text-red-400";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Cashbook" }
                script src="https://cdn.tailwindcss.com" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="p-4 bg-gray-900 text-white min-h-screen"
            {
                (content)
            }
        }
    }
}

/// Format `number` as dollars with thousands separators and two decimal
/// places, e.g. "-$1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| currency_formatter("$"));
    let negative_fmt = NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"));

    let formatted_string = match (positive_fmt, negative_fmt) {
        (Some(positive_fmt), Some(negative_fmt)) => {
            if number < 0.0 {
                negative_fmt.fmt_string(number.abs())
            } else if number > 0.0 {
                positive_fmt.fmt_string(number)
            } else {
                // Zero is hardcoded as "0", so we must specify the formatted string for zero
                return "$0.00".to_owned();
            }
        }
        _ => {
            tracing::error!("Could not create the currency formatter.");
            return format!("{}${:.2}", if number < 0.0 { "-" } else { "" }, number.abs());
        }
    };

    pad_decimals(formatted_string)
}

fn currency_formatter(prefix: &str) -> Option<Formatter> {
    Formatter::currency(prefix)
        .map(|formatter| formatter.precision(Precision::Decimals(2)))
        .ok()
}

/// numfmt drops trailing zeros, e.g. "12.30" comes out as "12.3".
fn pad_decimals(formatted: String) -> String {
    match formatted.rsplit_once('.') {
        Some((_, decimals)) if decimals.len() >= 2 => formatted,
        Some((_, decimals)) => format!("{formatted}{}", "0".repeat(2 - decimals.len())),
        None => format!("{formatted}.00"),
    }
}
