use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::nav::routes::Route;
use crate::ui::theme::Theme;

/// Static copy for the placeholder pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoContent {
    pub subtitle: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
    pub coming_soon: &'static str,
}

const KEY_REFERENCE: &[(&str, &str)] = &[
    ("Up/Down", "Move through menu options"),
    ("Enter/Space", "Activate the selected option or focused button"),
    ("1-7", "Jump straight to a main menu option"),
    ("Tab/Shift+Tab", "Move focus between fields, buttons and links"),
    ("Esc", "Leave a field, close a dialog, or return to the main menu"),
    ("Ctrl+C", "Quit immediately"),
];

pub fn info_content(route: Route) -> Option<InfoContent> {
    let content = match route {
        Route::ReportsAnalytics => InfoContent {
            subtitle: "Business intelligence reports and portfolio analytics",
            heading: "Reports & Analytics Dashboard",
            body: "Access comprehensive business intelligence reports, portfolio performance \
                   analytics, and investment insights. This feature will provide detailed \
                   analysis of your investment data.",
            coming_soon: "Coming Soon: Portfolio performance charts, risk analysis, and custom \
                          reporting tools.",
        },
        Route::SystemAdministration => InfoContent {
            subtitle: "Manage user accounts, permissions, and system settings",
            heading: "System Administration Panel",
            body: "Manage user accounts, configure system permissions, and adjust application \
                   settings. Administrative functions for system maintenance and user management.",
            coming_soon: "Coming Soon: User management, role-based access control, and system \
                          configuration tools.",
        },
        Route::AuditCompliance => InfoContent {
            subtitle: "Security logs, compliance reports, and audit trails",
            heading: "Audit & Compliance Center",
            body: "Monitor security events, generate compliance reports, and review audit \
                   trails. Ensure regulatory compliance and maintain security oversight.",
            coming_soon: "Coming Soon: Security logs, compliance dashboards, and audit trail \
                          reporting.",
        },
        Route::HelpDocumentation => InfoContent {
            subtitle: "User guides, documentation, and support resources",
            heading: "Help & Support Center",
            body: "Access comprehensive user guides, system documentation, and support \
                   resources. Get help with using the Investment Portfolio Management System.",
            coming_soon: "Coming Soon: User manuals, FAQ section, video tutorials, and contact \
                          support.",
        },
        Route::MainMenu | Route::PortfolioInquiry | Route::TransactionHistory => return None,
    };
    Some(content)
}

pub struct InfoPage<'a> {
    route: Route,
    content: InfoContent,
    theme: &'a Theme,
}

impl<'a> InfoPage<'a> {
    pub fn new(route: Route, content: InfoContent, theme: &'a Theme) -> Self {
        Self {
            route,
            content,
            theme,
        }
    }
}

impl Widget for InfoPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" {} ", self.route.title()))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        let mut lines = vec![
            Line::from(Span::styled(
                self.content.subtitle,
                Style::default().fg(colors.text_muted()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.content.heading,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(self.content.body, Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                self.content.coming_soon,
                Style::default().fg(colors.text_muted()),
            )),
        ];

        if self.route == Route::HelpDocumentation {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Keyboard Reference",
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )));
            for (keys, what) in KEY_REFERENCE {
                lines.push(Line::from(vec![
                    Span::styled(format!("{keys:>14}  "), Style::default().fg(colors.accent())),
                    Span::styled(*what, Style::default().fg(colors.fg())),
                ]));
            }
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}
