use clap::Parser;
use lifeflowapp::api::{BlockOp, FeedApi, LifeflowApi, PageFilter, PageStatusFilter, PageUpdate};
use lifeflowapp::config::{Backend, LifeflowConfig};
use lifeflowapp::error::{LifeflowError, Result};
use lifeflowapp::feed::FeedStore;
use lifeflowapp::store::local::LocalStore;
use lifeflowapp::store::rest::RestStore;
use lifeflowapp::store::PageStore;
use std::io::Write;
use tracing::debug;

use super::render;
use super::setup::{BlockCommands, Cli, Commands, FeedCommands};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = LifeflowConfig::load()?;

    match config.backend()? {
        Backend::Local => {
            let data_dir = config.data_dir()?;
            debug!(dir = %data_dir.display(), "using local backend");
            let api = LifeflowApi::new(LocalStore::new(data_dir));
            drive(api, None::<FeedApi<RestStore>>, cli)
        }
        Backend::Rest => {
            debug!(url = %config.api_base_url, "using rest backend");
            let store = RestStore::from_url_str(config.user_id(), &config.api_base_url)?;
            let feed = FeedApi::new(store.clone());
            let api = LifeflowApi::new(store);
            drive(api, Some(feed), cli)
        }
    }
}

/// Runs one parsed command against the chosen backends. The feed is only
/// available on the rest backend.
fn drive<S: PageStore, F: FeedStore>(
    mut api: LifeflowApi<S>,
    feed: Option<FeedApi<F>>,
    cli: Cli,
) -> Result<()> {
    match cli.command {
        Some(Commands::New { title, under }) => {
            let result = api.create_page(title, under.as_deref())?;
            render::print_messages(&result.messages);
        }
        Some(Commands::List {
            trash,
            favorites,
            all,
            search,
        }) => {
            let status = if all {
                PageStatusFilter::All
            } else if trash {
                PageStatusFilter::Trashed
            } else if favorites {
                PageStatusFilter::Favorites
            } else {
                PageStatusFilter::Active
            };
            let result = api.get_pages(PageFilter {
                status,
                search_term: search,
            })?;
            render::print_pages(&result.listed_pages);
            render::print_messages(&result.messages);
        }
        Some(Commands::View { indexes }) => {
            let result = api.view_pages(&indexes)?;
            render::print_full_pages(&result.listed_pages);
            render::print_messages(&result.messages);
        }
        Some(Commands::Set {
            index,
            title,
            icon,
            cover,
        }) => {
            let update = PageUpdate {
                title,
                icon,
                cover_image: cover,
            };
            if update.is_empty() {
                return Err(LifeflowError::Api(
                    "Nothing to change (use --title, --icon, or --cover)".into(),
                ));
            }
            let result = api.update_page(&index, update)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Block(block)) => {
            let (index, op) = block_op(block);
            let result = api.edit_page(&index, op)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Trash { indexes }) => {
            let result = api.trash_pages(&indexes)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Restore { indexes }) => {
            let result = api.restore_pages(&indexes)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Purge { indexes, force }) => {
            if !force {
                let preview = api.purge_preview(&indexes)?;
                if preview.targets.is_empty() {
                    println!("Trash is empty.");
                    return Ok(());
                }
                if !confirm_purge(preview.targets.len(), preview.descendant_count)? {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            let result = api.purge_pages(&indexes)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Fav { indexes }) => {
            let result = api.favorite_pages(&indexes)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Unfav { indexes }) => {
            let result = api.unfavorite_pages(&indexes)?;
            render::print_messages(&result.messages);
        }
        Some(Commands::Feed(cmd)) => {
            let Some(mut feed) = feed else {
                return Err(LifeflowError::Api(
                    "The feed needs the rest backend (set backend = \"rest\")".into(),
                ));
            };
            let result = match cmd {
                FeedCommands::List => feed.list()?,
                FeedCommands::Publish {
                    kind,
                    title,
                    description,
                    author,
                    tags,
                } => feed.publish(kind.into(), title, description, author, tags)?,
                FeedCommands::Like { position } => feed.like(position)?,
            };
            render::print_feed(&result.feed_items);
            render::print_messages(&result.messages);
        }
        None => {
            let result = api.get_pages(PageFilter::default())?;
            render::print_pages(&result.listed_pages);
            render::print_messages(&result.messages);
        }
    }

    Ok(())
}

fn block_op(cmd: BlockCommands) -> (String, BlockOp) {
    match cmd {
        BlockCommands::Set {
            index,
            position,
            content,
        } => (index, BlockOp::Set { position, content }),
        BlockCommands::Add {
            index,
            kind,
            content,
            after,
        } => {
            let op = match after {
                Some(position) => BlockOp::Insert {
                    position,
                    kind: kind.into(),
                    content,
                },
                None => BlockOp::Append {
                    kind: kind.into(),
                    content,
                },
            };
            (index, op)
        }
        BlockCommands::Check { index, position } => (
            index,
            BlockOp::Check {
                position,
                checked: true,
            },
        ),
        BlockCommands::Uncheck { index, position } => (
            index,
            BlockOp::Check {
                position,
                checked: false,
            },
        ),
        BlockCommands::Convert {
            index,
            position,
            kind,
        } => (
            index,
            BlockOp::Convert {
                position,
                kind: kind.into(),
            },
        ),
        BlockCommands::Rm { index, position } => (index, BlockOp::Delete { position }),
        BlockCommands::Move { index, from, to } => (index, BlockOp::Move { from, to }),
    }
}

fn confirm_purge(targets: usize, descendants: usize) -> Result<bool> {
    if descendants > 0 {
        print!(
            "Permanently delete {} page(s) and {} nested page(s)? [y/N] ",
            targets, descendants
        );
    } else {
        print!("Permanently delete {} page(s)? [y/N] ", targets);
    }
    std::io::stdout().flush().map_err(LifeflowError::Io)?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(LifeflowError::Io)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
