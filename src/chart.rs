use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use yew::prelude::*;

use crate::finance::{format_currency, DailyAggregate};

const PLOT_HEIGHT: f64 = 180.0;
const PLOT_TOP: f64 = 16.0;
const GROUP_WIDTH: f64 = 56.0;
const BAR_WIDTH: f64 = 18.0;
const SIDE_PAD: f64 = 24.0;

#[derive(Properties, PartialEq)]
pub struct TransactionsChartProps {
    pub aggregates: Vec<DailyAggregate>,
    pub currency_symbol: String,
}

/// Income/expense bars per day, one group per aggregate in list order.
#[function_component(TransactionsChart)]
pub fn transactions_chart(props: &TransactionsChartProps) -> Html {
    if props.aggregates.is_empty() {
        return html! {
            <p class="text-sm text-muted-foreground">{"No transactions to chart yet."}</p>
        };
    }

    let max = props
        .aggregates
        .iter()
        .flat_map(|a| [a.income_total, a.expense_total])
        .max()
        .unwrap_or(Decimal::ONE);
    let scale = max.to_f64().filter(|m| *m > 0.0).unwrap_or(1.0);

    let width = SIDE_PAD * 2.0 + props.aggregates.len() as f64 * GROUP_WIDTH;
    let baseline = PLOT_TOP + PLOT_HEIGHT;
    let symbol = props.currency_symbol.clone();

    html! {
        <div class="overflow-x-auto">
            <div class="flex items-center gap-4 mb-2 text-xs text-muted-foreground">
                <span class="flex items-center gap-1">
                    <span class="w-3 h-3 rounded-sm bg-green-500 inline-block"></span>
                    {"Money in"}
                </span>
                <span class="flex items-center gap-1">
                    <span class="w-3 h-3 rounded-sm bg-red-400 inline-block"></span>
                    {"Money out"}
                </span>
            </div>
            <svg
                width={width.to_string()}
                height={(baseline + 28.0).to_string()}
                viewBox={format!("0 0 {} {}", width, baseline + 28.0)}
            >
                <line
                    x1={SIDE_PAD.to_string()}
                    y1={baseline.to_string()}
                    x2={(width - SIDE_PAD).to_string()}
                    y2={baseline.to_string()}
                    stroke="#94a3b8"
                    stroke-width="1"
                />
                { for props.aggregates.iter().enumerate().map(|(i, aggregate)| {
                    let group_x = SIDE_PAD + i as f64 * GROUP_WIDTH + 6.0;
                    let income_h = aggregate.income_total.to_f64().unwrap_or(0.0) / scale * PLOT_HEIGHT;
                    let expense_h = aggregate.expense_total.to_f64().unwrap_or(0.0) / scale * PLOT_HEIGHT;
                    let label = aggregate.date.get(5..).unwrap_or(&aggregate.date).to_string();
                    let tooltip = format!(
                        "{} — in {}, out {}, net {}",
                        aggregate.date,
                        format_currency(aggregate.income_total, &symbol),
                        format_currency(aggregate.expense_total, &symbol),
                        format_currency(aggregate.net, &symbol),
                    );

                    html! {
                        <g key={aggregate.date.clone()}>
                            <title>{ tooltip }</title>
                            <rect
                                x={group_x.to_string()}
                                y={(baseline - income_h).to_string()}
                                width={BAR_WIDTH.to_string()}
                                height={income_h.to_string()}
                                rx="2"
                                fill="#4CAF50"
                            />
                            <rect
                                x={(group_x + BAR_WIDTH + 4.0).to_string()}
                                y={(baseline - expense_h).to_string()}
                                width={BAR_WIDTH.to_string()}
                                height={expense_h.to_string()}
                                rx="2"
                                fill="#f47067"
                            />
                            <text
                                x={(group_x + BAR_WIDTH + 2.0).to_string()}
                                y={(baseline + 16.0).to_string()}
                                text-anchor="middle"
                                font-size="9"
                                fill="#94a3b8"
                            >
                                { label }
                            </text>
                        </g>
                    }
                }) }
            </svg>
        </div>
    }
}
