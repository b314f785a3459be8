use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, Widget, Wrap};

use crate::api::schema::{TransactionHistory, TransactionStatus};
use crate::format::{format_currency, format_number, gain_loss_tone};
use crate::ui::layout::LayoutTier;
use crate::ui::theme::Theme;

pub struct TransactionList<'a> {
    history: &'a TransactionHistory,
    tier: LayoutTier,
    theme: &'a Theme,
}

impl<'a> TransactionList<'a> {
    pub fn new(history: &'a TransactionHistory, tier: LayoutTier, theme: &'a Theme) -> Self {
        Self {
            history,
            tier,
            theme,
        }
    }
}

impl Widget for TransactionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" Transactions ({}) ", self.history.transactions.len()))
            .border_style(Style::default().fg(colors.border()));

        if self.history.transactions.is_empty() {
            let message = if self.history.message.is_empty() {
                "No transactions found for this account."
            } else {
                self.history.message.as_str()
            };
            Paragraph::new(Span::styled(
                format!("  {message}"),
                Style::default().fg(colors.text_muted()),
            ))
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
            return;
        }

        let wide = self.tier == LayoutTier::Wide;
        let mut header = vec!["Date"];
        if wide {
            header.push("Time");
        }
        header.extend(["Investment", "Type", "Qty", "Price", "Amount", "Status"]);

        let rows: Vec<Row> = self
            .history
            .transactions
            .iter()
            .map(|tx| {
                let mut cells = vec![Cell::from(tx.display_date())];
                if wide {
                    cells.push(Cell::from(tx.time.clone()));
                }
                let status_color = match tx.status {
                    TransactionStatus::Done => colors.success(),
                    TransactionStatus::Pending => colors.warning(),
                    TransactionStatus::Failed | TransactionStatus::Reversed => colors.error(),
                    TransactionStatus::Unknown => colors.text_muted(),
                };
                cells.extend([
                    Cell::from(tx.investment_id.clone()),
                    Cell::from(tx.kind.label()),
                    Cell::from(format_number(tx.quantity, 0)),
                    Cell::from(format_currency(tx.price, &tx.currency)),
                    Cell::from(format_currency(tx.amount, &tx.currency))
                        .style(Style::default().fg(colors.tone(gain_loss_tone(tx.amount)))),
                    Cell::from(tx.status.label()).style(Style::default().fg(status_color)),
                ]);
                Row::new(cells).style(Style::default().fg(colors.fg()))
            })
            .collect();

        let mut widths = vec![Constraint::Length(10)];
        if wide {
            widths.push(Constraint::Length(8));
        }
        widths.extend([
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Min(8),
        ]);

        let table = Table::new(rows, widths)
            .header(
                Row::new(header).style(
                    Style::default()
                        .fg(colors.header_fg())
                        .bg(colors.header_bg())
                        .add_modifier(Modifier::BOLD),
                ),
            )
            .column_spacing(1)
            .block(block);
        Widget::render(table, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_rows(history: &TransactionHistory) -> Vec<String> {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 8);
        let mut buf = Buffer::empty(area);
        TransactionList::new(history, LayoutTier::Wide, &theme).render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_list_shows_server_message() {
        let history = TransactionHistory {
            account_number: "1234567899".to_string(),
            transactions: Vec::new(),
            message: "Transaction history feature coming soon".to_string(),
        };
        let rows = render_rows(&history);
        assert!(rows
            .iter()
            .any(|r| r.contains("Transaction history feature coming soon")));
    }

    #[test]
    fn rows_show_formatted_dates() {
        let history: TransactionHistory = serde_json::from_str(
            r#"{"accountNumber":"1234567899","transactions":[
                {"date":"20240628","time":"101500","investmentId":"AAPL","type":"BU",
                 "quantity":10,"price":185.25,"amount":-1852.5,"currency":"USD","status":"D"}
            ]}"#,
        )
        .unwrap();
        let rows = render_rows(&history);
        assert!(rows.iter().any(|r| r.contains("2024-06-28")));
        assert!(rows.iter().any(|r| r.contains("-$1,852.50")));
    }
}
