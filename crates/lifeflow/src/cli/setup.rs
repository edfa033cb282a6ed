use clap::{Parser, Subcommand, ValueEnum};
use lifeflowapp::feed::FeedKind;
use lifeflowapp::model::BlockKind;

#[derive(Parser, Debug)]
#[command(name = "lifeflow")]
#[command(about = "Block-based note taking for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new page
    #[command(alias = "n")]
    New {
        /// Title of the page (defaults to "Untitled")
        title: Option<String>,

        /// Index of the parent page to nest under (e.g. 1, 2.1)
        #[arg(long)]
        under: Option<String>,
    },

    /// List pages
    #[command(alias = "ls")]
    List {
        /// Show trashed pages
        #[arg(long, conflicts_with_all = ["favorites", "all"])]
        trash: bool,

        /// Show favorite pages
        #[arg(long, conflicts_with = "all")]
        favorites: bool,

        /// Show everything, trash included
        #[arg(long)]
        all: bool,

        /// Filter by title
        #[arg(short, long)]
        search: Option<String>,
    },

    /// View one or more pages with their blocks
    #[command(alias = "v")]
    View {
        /// Indexes of the pages (e.g. 1 f1 t1) or a title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Change a page's title, icon, or cover image
    Set {
        /// Index of the page
        index: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New icon (pass "" to reset to the default)
        #[arg(long)]
        icon: Option<String>,

        /// New cover image URL (pass "" to remove)
        #[arg(long)]
        cover: Option<String>,
    },

    /// Edit the blocks of a page
    #[command(subcommand, alias = "b")]
    Block(BlockCommands),

    /// Move pages to the trash
    #[command(alias = "rm")]
    Trash {
        /// Indexes of the pages (e.g. 1 3 2.1)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Restore pages from the trash
    Restore {
        /// Trash indexes (e.g. t1, or bare numbers meaning t-indexes)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Permanently delete trashed pages (all of the trash when no index
    /// is given)
    Purge {
        /// Trash indexes (e.g. t1 t2)
        #[arg(num_args = 0..)]
        indexes: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Mark pages as favorites
    Fav {
        /// Indexes of the pages
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Remove pages from favorites
    Unfav {
        /// Indexes of the pages (e.g. f1 or their regular index)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Browse and publish to the discover feed
    #[command(subcommand)]
    Feed(FeedCommands),
}

#[derive(Subcommand, Debug)]
pub enum BlockCommands {
    /// Replace the content of a block
    Set {
        /// Index of the page
        index: String,
        /// 1-based block position
        position: usize,
        /// New content
        content: String,
    },

    /// Add a block at the end of a page, or after --after
    Add {
        /// Index of the page
        index: String,
        /// Kind of the new block
        kind: BlockKindArg,
        /// Initial content
        content: Option<String>,
        /// Insert after this 1-based position instead of appending
        #[arg(long)]
        after: Option<usize>,
    },

    /// Tick a todo block
    Check {
        index: String,
        position: usize,
    },

    /// Untick a todo block
    Uncheck {
        index: String,
        position: usize,
    },

    /// Convert a block to another kind, keeping its content
    Convert {
        index: String,
        position: usize,
        kind: BlockKindArg,
    },

    /// Remove a block (the page self-heals if it was the last one)
    Rm {
        index: String,
        position: usize,
    },

    /// Move a block to another position
    Move {
        index: String,
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum FeedCommands {
    /// Show the feed, newest first
    #[command(alias = "ls")]
    List,

    /// Publish an item to the feed
    Publish {
        /// Kind of item
        kind: FeedKindArg,
        /// Title
        title: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// Author name
        #[arg(long)]
        author: Option<String>,
        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Like the item at a position, as printed by `feed list`
    Like { position: usize },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BlockKindArg {
    Text,
    H1,
    H2,
    Bullet,
    Todo,
    Quote,
    Image,
}

impl From<BlockKindArg> for BlockKind {
    fn from(arg: BlockKindArg) -> Self {
        match arg {
            BlockKindArg::Text => BlockKind::Text,
            BlockKindArg::H1 => BlockKind::Heading1,
            BlockKindArg::H2 => BlockKind::Heading2,
            BlockKindArg::Bullet => BlockKind::BulletList,
            BlockKindArg::Todo => BlockKind::Todo,
            BlockKindArg::Quote => BlockKind::Quote,
            BlockKindArg::Image => BlockKind::Image,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FeedKindArg {
    Template,
    Blog,
    Update,
}

impl From<FeedKindArg> for FeedKind {
    fn from(arg: FeedKindArg) -> Self {
        match arg {
            FeedKindArg::Template => FeedKind::Template,
            FeedKindArg::Blog => FeedKind::Blog,
            FeedKindArg::Update => FeedKind::WorkspaceUpdate,
        }
    }
}
