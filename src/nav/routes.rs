#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    MainMenu,
    PortfolioInquiry,
    TransactionHistory,
    ReportsAnalytics,
    SystemAdministration,
    AuditCompliance,
    HelpDocumentation,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::MainMenu,
        Route::PortfolioInquiry,
        Route::TransactionHistory,
        Route::ReportsAnalytics,
        Route::SystemAdministration,
        Route::AuditCompliance,
        Route::HelpDocumentation,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::MainMenu => "/",
            Route::PortfolioInquiry => "/portfolio-inquiry",
            Route::TransactionHistory => "/transaction-history",
            Route::ReportsAnalytics => "/reports-analytics",
            Route::SystemAdministration => "/system-administration",
            Route::AuditCompliance => "/audit-compliance",
            Route::HelpDocumentation => "/help-documentation",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::MainMenu => "Main Menu",
            Route::PortfolioInquiry => "Portfolio Inquiry",
            Route::TransactionHistory => "Transaction History",
            Route::ReportsAnalytics => "Reports & Analytics",
            Route::SystemAdministration => "System Administration",
            Route::AuditCompliance => "Audit & Compliance",
            Route::HelpDocumentation => "Help & Documentation",
        }
    }

    pub fn is_home(self) -> bool {
        self == Route::MainMenu
    }
}

/// Inline behavior a menu item or dialog button can trigger instead of a route change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Ask before quitting.
    RequestExit,
    Quit,
    Noop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Route(Route),
    Action(Action),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub shortcut: Option<char>,
    pub disabled: bool,
    pub target: Target,
}

impl MenuItem {
    fn route(
        id: &'static str,
        label: &'static str,
        shortcut: char,
        description: &'static str,
        route: Route,
    ) -> Self {
        Self {
            id,
            label,
            description,
            shortcut: Some(shortcut),
            disabled: false,
            target: Target::Route(route),
        }
    }
}

pub fn main_menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem::route(
            "portfolio",
            "Portfolio",
            '1',
            "View and analyze your investment portfolio holdings and performance",
            Route::PortfolioInquiry,
        ),
        MenuItem::route(
            "history",
            "History",
            '2',
            "Review your investment transaction history and activity",
            Route::TransactionHistory,
        ),
        MenuItem::route(
            "reports",
            "Reports",
            '3',
            "Portfolio performance reports and analytics",
            Route::ReportsAnalytics,
        ),
        MenuItem::route(
            "admin",
            "Administration",
            '4',
            "System configuration and user management",
            Route::SystemAdministration,
        ),
        MenuItem::route(
            "audit",
            "Audit",
            '5',
            "Audit trails and compliance reporting",
            Route::AuditCompliance,
        ),
        MenuItem::route(
            "help",
            "Help",
            '6',
            "Keyboard reference and user guide",
            Route::HelpDocumentation,
        ),
        MenuItem {
            id: "exit",
            label: "Exit",
            description: "Exit the application",
            shortcut: Some('7'),
            disabled: false,
            target: Target::Action(Action::RequestExit),
        },
    ]
}
