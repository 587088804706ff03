//! Renders the dashboard as a standalone HTML page.

use maud::{Markup, html};

use crate::{
    dashboard::{
        DashboardView,
        aggregation::Summary,
        charts::{DashboardChart, charts_script, charts_view, transaction_chart},
    },
    html::{
        CARD_HEADER_STYLE, CARD_STYLE, ECHARTS_URL, HeadElement, NEGATIVE_TEXT_STYLE,
        POSITIVE_TEXT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    store::TransactionEntry,
};

/// The HTML ID of the transaction chart container.
pub const TRANSACTION_CHART_ID: &str = "transaction-chart";

/// Render the summary, chart and transaction list of `view` as an HTML page.
pub fn render_dashboard(view: &DashboardView) -> Markup {
    let charts = [DashboardChart {
        id: TRANSACTION_CHART_ID,
        options: transaction_chart(&view.chart).to_string(),
    }];

    let content = html! {
        h1 class="text-3xl font-bold mb-6 text-center" { "Expense Tracker Dashboard" }

        (summary_view(&view.summary))

        div class=(CARD_STYLE)
        {
            h2 class=(CARD_HEADER_STYLE) { "Transaction Chart" }
            (charts_view(&charts))
        }

        (transaction_table_view(&view.rows, &view.query.search, view.query.type_filter.as_str()))
    };

    base(
        "Dashboard",
        &[
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            HeadElement::ScriptSource(charts_script(&charts)),
        ],
        &content,
    )
}

fn summary_view(summary: &Summary) -> Markup {
    let profit_loss_style = if summary.is_loss() {
        NEGATIVE_TEXT_STYLE
    } else {
        POSITIVE_TEXT_STYLE
    };

    html! {
        section id="summary" class={(CARD_STYLE) " text-center"}
        {
            h2 class="text-xl font-medium" { "Summary" }
            p {
                "Total Income: "
                span id="income-total" class=(POSITIVE_TEXT_STYLE) { (format_currency(summary.income_total)) }
            }
            p {
                "Total Expenses: "
                span id="expense-total" class=(NEGATIVE_TEXT_STYLE) { (format_currency(summary.expense_total)) }
            }
            p {
                "Profit/Loss: "
                span id="profit-loss" class=(profit_loss_style) { (format_currency(summary.profit_loss)) }
            }
        }
    }
}

fn transaction_table_view(rows: &[TransactionEntry], search: &str, type_filter: &str) -> Markup {
    html! {
        section id="transactions" class=(CARD_STYLE)
        {
            h2 class=(CARD_HEADER_STYLE) { "Transaction List" }

            @if !search.is_empty() || type_filter != "all" {
                p class="text-sm text-gray-400 mb-2" {
                    "Showing " (type_filter) " transactions"
                    @if !search.is_empty() { " matching \"" (search) "\"" }
                }
            }

            div class="overflow-x-auto"
            {
                table class="w-full text-left text-sm"
                {
                    thead
                    {
                        tr
                        {
                            th class=(TABLE_HEADER_STYLE) { "ID" }
                            th class=(TABLE_HEADER_STYLE) { "Date" }
                            th class=(TABLE_HEADER_STYLE) { "Type" }
                            th class=(TABLE_HEADER_STYLE) { "Description" }
                            th class=(TABLE_HEADER_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for row in rows {
                            @let amount_style = if row.transaction.is_income() {
                                POSITIVE_TEXT_STYLE
                            } else {
                                NEGATIVE_TEXT_STYLE
                            };

                            tr class=(TABLE_ROW_STYLE) data-id=(row.id)
                            {
                                td class=(TABLE_CELL_STYLE) { (row.id) }
                                td class=(TABLE_CELL_STYLE) { (row.transaction.date()) }
                                td class={(TABLE_CELL_STYLE) " capitalize"} { (row.transaction.transaction_type()) }
                                td class=(TABLE_CELL_STYLE) { (row.transaction.description()) }
                                td class={(TABLE_CELL_STYLE) " " (amount_style)} { (format_currency(row.transaction.amount())) }
                            }
                        }

                        @if rows.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class={(TABLE_CELL_STYLE) " text-center"} { "No transactions" }
                            }
                        }
                    }
                }
            }
        }
    }
}
