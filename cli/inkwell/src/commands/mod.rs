mod account;
mod collections;
mod feeds;
mod notes;
mod route;
mod theme;

use std::sync::Arc;

use anyhow::Result;
use bpaf::Bpaf;
use indoc::indoc;
use inkwell_client::types::Ack;
use inkwell_client::{ApiClient, LocalStorage};
use inkwell_sdk::session::SessionStore;
use inkwell_sdk::theme::ThemeStore;
use tracing::debug;

use crate::config::Config;
use crate::utils::init::{init_client, init_storage, init_theme, terminal_appearance};
use crate::utils::message;

static INKWELL_DESCRIPTION: &str = indoc! {"
    Inkwell is a reading notes client.

    Write notes about what you read, gather them into collections,
    follow other readers and browse what is popular."
};

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(options, version, descr(INKWELL_DESCRIPTION))]
pub struct InkwellCli(#[bpaf(external(inkwell_args))] pub InkwellArgs);

/// Main inkwell args parser
///
/// To parse the inkwell CLI, use [`InkwellCli`] through [`inkwell_cli()`].
#[derive(Debug, Bpaf)]
#[bpaf(ignore_rustdoc)]
pub struct InkwellArgs {
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// Serve canned data instead of contacting the backend
    /// (development mode only)
    #[bpaf(long)]
    pub mock: bool,

    #[bpaf(external(commands))]
    command: Commands,
}

impl InkwellArgs {
    pub async fn handle(self, mut config: Config) -> Result<()> {
        if self.mock {
            config.use_mock = true;
        }
        let app = App::new(config)?;
        debug!(client = ?app.client, "initialized");
        self.command.handle(&app).await
    }
}

/// State shared by all commands, owned by the application root.
pub struct App {
    pub config: Config,
    pub storage: Arc<dyn LocalStorage>,
    pub client: ApiClient,
    pub session: SessionStore,
    pub theme: ThemeStore,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let storage = init_storage(&config);
        let client = init_client(&config, storage.clone())?;
        let theme = init_theme(storage.clone(), terminal_appearance())?;
        Ok(Self {
            config,
            storage,
            client,
            session: SessionStore::new(),
            theme,
        })
    }
}

#[derive(Bpaf, Clone)]
enum Commands {
    /// Show the logged in user
    #[bpaf(command)]
    Me(#[bpaf(external(account::me))] account::Me),

    /// Show statistics of the logged in user
    #[bpaf(command)]
    Stats(#[bpaf(external(account::stats))] account::Stats),

    /// Show recent activity of the logged in user
    #[bpaf(command)]
    Activities(#[bpaf(external(account::activities))] account::Activities),

    /// Follow a user
    #[bpaf(command)]
    Follow(#[bpaf(external(account::follow))] account::Follow),

    /// Stop following a user
    #[bpaf(command)]
    Unfollow(#[bpaf(external(account::unfollow))] account::Unfollow),

    /// Write, read and react to notes
    #[bpaf(command)]
    Notes(#[bpaf(external(notes::notes_commands))] notes::NotesCommands),

    /// Organise notes into collections
    #[bpaf(command)]
    Collections(#[bpaf(external(collections::collections_commands))] collections::CollectionsCommands),

    /// Show the home feed
    #[bpaf(command)]
    Home(#[bpaf(external(feeds::home))] feeds::Home),

    /// Browse popular notes and tags
    #[bpaf(command)]
    Explore(#[bpaf(external(feeds::explore_commands))] feeds::ExploreCommands),

    /// Log in
    #[bpaf(command)]
    Login(#[bpaf(external(account::login))] account::Login),

    /// Create an account
    #[bpaf(command)]
    Register(#[bpaf(external(account::register))] account::Register),

    /// Log out
    #[bpaf(command)]
    Logout(#[bpaf(external(account::logout))] account::Logout),

    /// Manage the stored access token
    #[bpaf(command)]
    Token(#[bpaf(external(account::token_commands))] account::TokenCommands),

    /// Show or toggle the colour theme
    #[bpaf(command)]
    Theme(#[bpaf(external(theme::theme))] theme::Theme),

    /// Show which view a path leads to
    #[bpaf(command)]
    Route(#[bpaf(external(route::route))] route::Route),
}

impl std::fmt::Debug for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Command")
    }
}

impl Commands {
    async fn handle(self, app: &App) -> Result<()> {
        match self {
            Commands::Me(args) => args.handle(app).await?,
            Commands::Stats(args) => args.handle(app).await?,
            Commands::Activities(args) => args.handle(app).await?,
            Commands::Follow(args) => args.handle(app).await?,
            Commands::Unfollow(args) => args.handle(app).await?,
            Commands::Notes(args) => args.handle(app).await?,
            Commands::Collections(args) => args.handle(app).await?,
            Commands::Home(args) => args.handle(app).await?,
            Commands::Explore(args) => args.handle(app).await?,
            Commands::Login(args) => args.handle(app).await?,
            Commands::Register(args) => args.handle(app).await?,
            Commands::Logout(args) => args.handle(app).await?,
            Commands::Token(args) => args.handle(app)?,
            Commands::Theme(args) => args.handle(app)?,
            Commands::Route(args) => args.handle()?,
        }
        Ok(())
    }
}

/// Report the acknowledgement of a void endpoint.
///
/// A missing or negative acknowledgement is not an error, the backend may
/// reply with an empty body or with an error payload.
pub(crate) fn report_ack(ack: Option<Ack>, done: impl std::fmt::Display) {
    match ack {
        Some(Ack { success: true }) => message::updated(done),
        Some(_) => message::warning(format!("{done}, but the server did not confirm it")),
        None => message::plain(done),
    }
}
