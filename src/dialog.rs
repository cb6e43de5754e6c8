//! Dialog controller: the per-chat menu state machine and the
//! parse → validate → convert → reply pipeline.
//!
//! The controller is a single long-lived instance holding its injected
//! collaborators. Every user-input or feed error is recovered here and
//! turned into exactly one reply message; only failures of the outbound
//! messaging capability propagate to the caller.

use crate::convert;
use crate::error::{KursBotError, Result};
use crate::models::{ChatId, ChatState, RateTable};
use crate::rates::RateTableProvider;
use crate::state::ChatStateStore;

/// Label of the button that moves a chat into conversion mode.
pub const START_BUTTON: &str = "\u{1f44b} Start";

/// Label of the button that opens the help submenu.
pub const HELP_BUTTON: &str = "\u{2753} Help";

/// Label of the help-submenu button that explains the bot.
pub const HOW_BUTTON: &str = "\u{2753} How does the bot work?";

/// Label of the help-submenu button that lists supported currencies.
pub const CURRENCIES_BUTTON: &str = "Currencies";

/// Label of the button that re-renders the current menu.
pub const BACK_BUTTON: &str = "Return to main menu";

/// `/help` command reply.
const HELP_TEXT: &str =
    "I am a simple Telegram bot that can respond to the /start and /help commands.";

/// Prompt shown when a chat enters conversion mode.
const ENTER_PROMPT: &str =
    "Enter a request or use the 'Help' button for more information";

/// Help-submenu prompt.
const HELP_MENU_PROMPT: &str = "How can I help?";

/// Static explanation of the conversion command format.
const HOW_TEXT: &str = "The bot returns the price of a given quantity of currency.\n\
Send the bot a single-line message, separating with spaces:\n\
the short name of the currency you want to price,\n\
the short name of the currency to price it in,\n\
the quantity of the first currency";

/// Reply to the back button.
const BACK_TEXT: &str = "You are back at the main menu";

/// Reply to unrecognized text in the started state.
const NOT_RECOGNIZED_TEXT: &str = "I am not programmed for such a command..";

/// Hint for a chat that has never been greeted.
const START_HINT_TEXT: &str = "Send /start to begin.";

/// Generic reply when the rate feed is unavailable.
const FEED_FAILURE_TEXT: &str = "Exchange rates are unavailable right now, try again later.";

/// Reply to a command whose amount token is not a number.
const AMOUNT_FORMAT_TEXT: &str = "Amount has a wrong format";

/// Reply to a command with missing tokens.
const MESSAGE_FORMAT_TEXT: &str = "Wrong format of message";

/// Abstract menu specification: ordered button labels grouped into rows.
///
/// The transport layer decides how rows become an actual keyboard; the
/// core never constructs transport-specific payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    /// Button labels, one inner vector per row.
    rows: Vec<Vec<String>>,
}

impl Menu {
    /// Creates a menu with all labels on a single row.
    #[inline]
    #[must_use]
    pub fn single_row<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::default().row(labels)
    }

    /// Appends a row of labels.
    #[inline]
    #[must_use]
    pub fn row<I, T>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.rows.push(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the rows of button labels.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Outbound messaging capability provided by the transport layer.
///
/// All methods take `&self` — implementations should use interior
/// mutability if they need any.
pub trait Messenger: core::fmt::Debug + Send + Sync {
    /// Sends one text message to the chat, optionally presenting a menu.
    ///
    /// # Errors
    ///
    /// Returns [`KursBotError::Transport`] if delivery fails.
    fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        menu: Option<&Menu>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// The main menu shown after `/start`.
fn main_menu() -> Menu {
    Menu::single_row([START_BUTTON, HELP_BUTTON])
}

/// The reduced menu shown in conversion mode.
fn entered_menu() -> Menu {
    Menu::single_row([HELP_BUTTON])
}

/// The help submenu.
fn help_menu() -> Menu {
    Menu::single_row([HOW_BUTTON, CURRENCIES_BUTTON, BACK_BUTTON])
}

/// Renders the `/values` listing, one `- CODE - Name` line per currency.
fn render_values(table: &RateTable) -> String {
    table
        .iter()
        .map(|(code, info)| format!("\n- {code} - {name}", name = info.name))
        .collect()
}

/// Dispatches incoming messages to menu actions or to the conversion
/// pipeline.
///
/// One instance serves the whole process; it owns no per-chat data beyond
/// what lives in the injected [`ChatStateStore`].
#[derive(Debug)]
pub struct DialogController<M, S> {
    /// Outbound messaging capability.
    messenger: M,
    /// Per-chat navigation state.
    states: S,
    /// Rate-table source.
    rates: RateTableProvider,
}

impl<M: Messenger, S: ChatStateStore> DialogController<M, S> {
    /// Creates a controller from its collaborators.
    #[inline]
    #[must_use]
    pub const fn new(messenger: M, states: S, rates: RateTableProvider) -> Self {
        Self {
            messenger,
            states,
            rates,
        }
    }

    /// Handles `/start`: greets the user by name and opens the main menu.
    ///
    /// # Errors
    ///
    /// Returns an error only if sending the reply or recording the state
    /// fails.
    #[tracing::instrument(skip_all, fields(chat = %chat))]
    pub async fn on_start(&self, chat: ChatId, user_name: &str) -> Result<()> {
        let greeting =
            format!("Hello, {user_name}. This is a currency-converter bot. Choose an option:");
        self.messenger
            .send_message(chat, &greeting, Some(&main_menu()))
            .await?;
        self.states.set(chat, ChatState::Started)
    }

    /// Handles `/help`: sends the static help message.
    ///
    /// # Errors
    ///
    /// Returns an error only if sending the reply fails.
    #[tracing::instrument(skip_all, fields(chat = %chat))]
    pub async fn on_help(&self, chat: ChatId) -> Result<()> {
        self.messenger.send_message(chat, HELP_TEXT, None).await
    }

    /// Handles `/values`: lists supported currency codes with their
    /// display names.
    ///
    /// A feed failure becomes a generic reply; chat state is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only if sending the reply fails.
    #[tracing::instrument(skip_all, fields(chat = %chat))]
    pub async fn on_values(&self, chat: ChatId) -> Result<()> {
        match self.rates.table().await {
            Ok(table) => {
                self.messenger
                    .send_message(chat, &render_values(&table), None)
                    .await
            }
            Err(error) => self.report_feed_failure(chat, &error).await,
        }
    }

    /// Handles free text: menu buttons first, then state-dependent
    /// dispatch, matching the original menu's precedence.
    ///
    /// # Errors
    ///
    /// Returns an error only if sending a reply or recording state fails.
    #[tracing::instrument(skip_all, fields(chat = %chat))]
    pub async fn on_text(&self, chat: ChatId, text: &str) -> Result<()> {
        match text {
            START_BUTTON => {
                self.messenger
                    .send_message(chat, ENTER_PROMPT, Some(&entered_menu()))
                    .await?;
                self.states.set(chat, ChatState::Entered)
            }
            HELP_BUTTON => {
                self.messenger
                    .send_message(chat, HELP_MENU_PROMPT, Some(&help_menu()))
                    .await
            }
            CURRENCIES_BUTTON => self.on_values(chat).await,
            HOW_BUTTON => self.messenger.send_message(chat, HOW_TEXT, None).await,
            BACK_BUTTON => self.on_back(chat).await,
            other => self.on_free_text(chat, other).await,
        }
    }

    /// Re-renders the menu matching the chat's current state.
    async fn on_back(&self, chat: ChatId) -> Result<()> {
        let Ok(state) = self.states.require(chat) else {
            // Never greeted: nothing to return to.
            return self
                .messenger
                .send_message(chat, START_HINT_TEXT, None)
                .await;
        };
        let menu = match state {
            ChatState::Started => main_menu(),
            ChatState::Entered => entered_menu(),
        };
        self.messenger
            .send_message(chat, BACK_TEXT, Some(&menu))
            .await
    }

    /// Dispatches arbitrary text according to the chat's state.
    async fn on_free_text(&self, chat: ChatId, text: &str) -> Result<()> {
        match self.states.get(chat)? {
            Some(ChatState::Started) => {
                self.messenger
                    .send_message(chat, NOT_RECOGNIZED_TEXT, None)
                    .await
            }
            Some(ChatState::Entered) => self.on_conversion(chat, text).await,
            None => {
                self.messenger
                    .send_message(chat, START_HINT_TEXT, None)
                    .await
            }
        }
    }

    /// Runs the parse → validate → convert → reply pipeline for one line
    /// of text.
    async fn on_conversion(&self, chat: ChatId, text: &str) -> Result<()> {
        let request = match convert::parse(text) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(error = %error, "rejected conversion command");
                let reply = if matches!(error, KursBotError::InvalidAmount { .. }) {
                    AMOUNT_FORMAT_TEXT
                } else {
                    MESSAGE_FORMAT_TEXT
                };
                return self.messenger.send_message(chat, reply, None).await;
            }
        };

        let table = match self.rates.table().await {
            Ok(table) => table,
            Err(error) => return self.report_feed_failure(chat, &error).await,
        };

        // Validate the base first so the reply names the right code.
        for code in [&request.base, &request.quote] {
            if !table.contains(code) {
                let reply = format!("Currency {code} is not found.");
                return self.messenger.send_message(chat, &reply, None).await;
            }
        }

        match convert::convert(&table, &request) {
            Ok(reply) => self.messenger.send_message(chat, &reply, None).await,
            Err(error) => {
                // Unreachable after validation, but never crash on it.
                tracing::debug!(error = %error, "conversion failed after validation");
                self.messenger
                    .send_message(chat, MESSAGE_FORMAT_TEXT, None)
                    .await
            }
        }
    }

    /// Sends the generic feed-failure reply; state is never modified on
    /// this path.
    async fn report_feed_failure(&self, chat: ChatId, error: &KursBotError) -> Result<()> {
        tracing::warn!(error = %error, "rate feed unavailable");
        self.messenger
            .send_message(chat, FEED_FAILURE_TEXT, None)
            .await
    }
}
