use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::PortfolioSource;
use crate::api::schema::{PortfolioSummary, TransactionHistory};
use crate::config::Config;
use crate::event::AppEvent;
use crate::focus::{self, ElementKind, FocusNode, FocusTarget};
use crate::lookup::{AccountLookup, LookupCommand};
use crate::nav::announce::Announcer;
use crate::nav::global::{EscapeContext, GlobalNavigation};
use crate::nav::keyboard::{KeyboardNav, NavOutcome};
use crate::nav::routes::{Action, MenuItem, Route, Target, main_menu_items};
use crate::schedule::{Deferred, take_due};
use crate::ui::components::confirm_dialog::{ConfirmationDialog, DialogOutcome};
use crate::ui::theme::Theme;
use crate::validation::AccountNumber;

pub const EXIT_TITLE: &str = "Exit Application";
pub const EXIT_MESSAGE: &str = "Are you sure you want to exit the application?";

/// Main menu state: the option list and its keyboard controller.
pub struct MenuPage {
    pub items: Vec<MenuItem>,
    pub nav: KeyboardNav,
    /// Option whose navigation is scheduled.
    pub activated: Option<usize>,
}

impl MenuPage {
    fn new(config: &Config) -> Self {
        let items = main_menu_items();
        let nav = KeyboardNav::new(items.len(), config.focus_options())
            .with_shortcuts(items.iter().map(|i| i.shortcut).collect())
            .with_disabled(items.iter().map(|i| i.disabled).collect());
        Self {
            items,
            nav,
            activated: None,
        }
    }

    fn reset(&mut self) {
        self.nav.reset();
        self.activated = None;
    }

    fn focus_nodes(&self) -> Vec<FocusNode> {
        (0..self.items.len())
            .map(|i| FocusNode::new(FocusTarget::MenuItem(i), ElementKind::Static).with_tab_index(0))
            .collect()
    }
}

pub struct App {
    pub route: Route,
    pub config: Config,
    pub theme: Theme,
    /// The element that would be `document.activeElement`.
    pub focus: Option<FocusTarget>,
    pub menu: MenuPage,
    pub inquiry: AccountLookup<PortfolioSummary>,
    pub history: AccountLookup<TransactionHistory>,
    pub dialog: ConfirmationDialog,
    pub global_nav: GlobalNavigation,
    pub announcer: Announcer,
    pub should_quit: bool,
    pending_route: Option<Deferred<Route>>,
    source: Arc<dyn PortfolioSource>,
    events: Sender<AppEvent>,
    next_request_id: u64,
}

impl App {
    pub fn new(
        config: Config,
        theme: Theme,
        source: Arc<dyn PortfolioSource>,
        events: Sender<AppEvent>,
    ) -> Self {
        let menu = MenuPage::new(&config);
        let announcer = Announcer::new(config.announce_changes, config.announcement_lifetime());
        Self {
            route: Route::MainMenu,
            config,
            theme,
            focus: None,
            menu,
            inquiry: AccountLookup::new(Route::TransactionHistory),
            history: AccountLookup::new(Route::PortfolioInquiry),
            dialog: ConfirmationDialog::new(),
            global_nav: GlobalNavigation::new(),
            announcer,
            should_quit: false,
            pending_route: None,
            source,
            events,
            next_request_id: 0,
        }
    }

    pub fn mount(&mut self) {
        self.global_nav.attach();
    }

    pub fn unmount(&mut self) {
        self.global_nav.detach();
        self.pending_route = None;
    }

    pub fn pending_route(&self) -> Option<Route> {
        self.pending_route.as_ref().map(|d| *d.value())
    }

    pub fn modal_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Focusable nodes of whatever is on top: the dialog when open,
    /// otherwise the current screen, in render order.
    pub fn focus_nodes(&self) -> Vec<FocusNode> {
        if self.dialog.is_open() {
            return ConfirmationDialog::nodes().to_vec();
        }
        match self.route {
            Route::MainMenu => self.menu.focus_nodes(),
            Route::PortfolioInquiry => self.inquiry.focus_nodes(),
            Route::TransactionHistory => self.history.focus_nodes(),
            Route::ReportsAnalytics
            | Route::SystemAdministration
            | Route::AuditCompliance
            | Route::HelpDocumentation => vec![FocusNode::button(FocusTarget::Back)],
        }
    }

    pub fn focused_kind(&self) -> Option<ElementKind> {
        self.focus
            .and_then(|target| focus::kind_of(&self.focus_nodes(), target))
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Tick => self.tick(now),
            AppEvent::Resize(_, _) => {}
            AppEvent::Portfolio { request_id, result } => {
                log_result("portfolio", request_id, &result);
                if !self.inquiry.finish(request_id, result) {
                    tracing::debug!(request_id, "dropped stale portfolio response");
                }
            }
            AppEvent::Transactions { request_id, result } => {
                log_result("transactions", request_id, &result);
                if !self.history.finish(request_id, result) {
                    tracing::debug!(request_id, "dropped stale transactions response");
                }
            }
        }
    }

    /// Single entry point for keys. Handlers are tried in priority order:
    /// modal, focused editable field, page controller, then global
    /// navigation for an Escape nobody consumed.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.dialog.is_open() {
            match self.dialog.handle_key(key, &mut self.focus) {
                DialogOutcome::Pending => {}
                DialogOutcome::Confirmed(action) | DialogOutcome::Cancelled(action) => {
                    self.apply_action(action)
                }
            }
            return;
        }

        if self.focused_kind().is_some_and(ElementKind::is_editable) {
            let command = match self.route {
                Route::PortfolioInquiry => self.inquiry.handle_field_key(key, &mut self.focus),
                Route::TransactionHistory => self.history.handle_field_key(key, &mut self.focus),
                _ => LookupCommand::Handled,
            };
            self.apply_command(command);
            return;
        }

        let propagate = match self.route {
            Route::MainMenu => self.handle_menu_key(key, now),
            Route::PortfolioInquiry => {
                let command = self.inquiry.handle_key(key, &mut self.focus);
                self.apply_command(command)
            }
            Route::TransactionHistory => {
                let command = self.history.handle_key(key, &mut self.focus);
                self.apply_command(command)
            }
            Route::ReportsAnalytics
            | Route::SystemAdministration
            | Route::AuditCompliance
            | Route::HelpDocumentation => self.handle_info_key(key),
        };

        if propagate && key.code == KeyCode::Esc {
            let ctx = EscapeContext {
                route: self.route,
                active: self.focused_kind(),
                modal_open: self.modal_open(),
            };
            if let Some(route) = self.global_nav.handle_escape(&ctx) {
                self.navigate(route);
            }
        }
    }

    /// Returns true when the key should keep propagating.
    fn handle_menu_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match self.menu.nav.handle_key(key) {
            NavOutcome::Moved(index) => {
                self.focus = Some(FocusTarget::MenuItem(index));
                self.announce_option(index, now);
                false
            }
            NavOutcome::Activate(index) => {
                self.activate_menu_item(index, now);
                false
            }
            NavOutcome::Shortcut { index, .. } => {
                self.menu.nav.select(index);
                self.focus = Some(FocusTarget::MenuItem(index));
                self.activate_menu_item(index, now);
                false
            }
            NavOutcome::Reset => {
                self.focus = None;
                true
            }
            NavOutcome::Ignored => match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    let reverse = key.code == KeyCode::BackTab
                        || key.modifiers.contains(KeyModifiers::SHIFT);
                    self.focus = focus::cycle(&self.menu.focus_nodes(), self.focus, reverse);
                    if let Some(FocusTarget::MenuItem(index)) = self.focus {
                        self.menu.nav.select(index);
                    }
                    false
                }
                KeyCode::Char('q') => {
                    self.apply_action(Action::RequestExit);
                    false
                }
                _ => true,
            },
        }
    }

    fn handle_info_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = focus::cycle(&self.focus_nodes(), self.focus, false);
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == Some(FocusTarget::Back) => {
                self.navigate(Route::MainMenu);
                false
            }
            _ => true,
        }
    }

    fn announce_option(&mut self, index: usize, now: Instant) {
        if let Some(item) = self.menu.items.get(index) {
            let message = format!(
                "{}, option {} of {}",
                item.label,
                index + 1,
                self.menu.items.len()
            );
            self.announcer.announce(message, now);
        }
    }

    fn activate_menu_item(&mut self, index: usize, now: Instant) {
        if self.pending_route.is_some() {
            return;
        }
        let Some((id, target, disabled)) = self
            .menu
            .items
            .get(index)
            .map(|item| (item.id, item.target, item.disabled))
        else {
            return;
        };
        if disabled {
            return;
        }
        match target {
            Target::Route(route) => {
                tracing::debug!(item = id, to = route.path(), "menu option activated");
                self.menu.activated = Some(index);
                self.pending_route = Some(Deferred::new(route, self.config.navigation_delay(), now));
            }
            Target::Action(action) => self.apply_action(action),
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::RequestExit => {
                self.dialog.open(
                    EXIT_TITLE,
                    EXIT_MESSAGE,
                    Action::Quit,
                    Action::Noop,
                    &mut self.focus,
                );
            }
            Action::Quit => {
                tracing::info!("exit confirmed");
                self.should_quit = true;
            }
            Action::Noop => {}
        }
    }

    /// Returns true when the key was left unconsumed.
    fn apply_command(&mut self, command: LookupCommand) -> bool {
        match command {
            LookupCommand::Handled => false,
            LookupCommand::Propagate => true,
            LookupCommand::Submit(account) => {
                self.start_fetch(account);
                false
            }
            LookupCommand::Navigate(route) => {
                self.navigate(route);
                false
            }
        }
    }

    fn start_fetch(&mut self, account: AccountNumber) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        let source = Arc::clone(&self.source);
        let tx = self.events.clone();

        match self.route {
            Route::PortfolioInquiry => {
                tracing::info!(request_id, %account, "fetching portfolio");
                self.inquiry.begin(request_id, account.clone());
                thread::spawn(move || {
                    let result = source.portfolio(&account);
                    let _ = tx.send(AppEvent::Portfolio { request_id, result });
                });
            }
            Route::TransactionHistory => {
                tracing::info!(request_id, %account, "fetching transactions");
                self.history.begin(request_id, account.clone());
                thread::spawn(move || {
                    let result = source.transactions(&account);
                    let _ = tx.send(AppEvent::Transactions { request_id, result });
                });
            }
            _ => {}
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.announcer.prune(now);
        if let Some(route) = take_due(&mut self.pending_route, now) {
            self.navigate(route);
        }
    }

    /// Tears down the current screen and shows `route`.
    pub fn navigate(&mut self, route: Route) {
        tracing::info!(from = self.route.path(), to = route.path(), "route change");

        self.pending_route = None;
        self.announcer.clear();
        if self.dialog.is_open() {
            self.dialog.close(&mut self.focus);
        }
        match self.route {
            Route::MainMenu => self.menu.reset(),
            Route::PortfolioInquiry => self.inquiry.new_search(),
            Route::TransactionHistory => self.history.new_search(),
            _ => {}
        }

        self.route = route;
        self.focus = match route {
            Route::PortfolioInquiry => self.inquiry.initial_focus(),
            Route::TransactionHistory => self.history.initial_focus(),
            _ => None,
        };
    }
}

fn log_result<T>(what: &str, request_id: u64, result: &Result<T, crate::api::ApiError>) {
    match result {
        Ok(_) => tracing::info!(request_id, what, "fetch succeeded"),
        Err(err) => tracing::warn!(request_id, what, error = %err, "fetch failed"),
    }
}
