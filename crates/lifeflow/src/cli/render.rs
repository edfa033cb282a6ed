use chrono::Utc;
use colored::*;
use lifeflowapp::api::CmdMessage;
use lifeflowapp::commands::MessageLevel;
use lifeflowapp::feed::FeedItem;
use lifeflowapp::index::{DisplayIndex, DisplayPage};
use lifeflowapp::model::{Block, BlockKind};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FAV_MARKER: &str = "★";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Prints the sidebar tree: favorites block first, then the regular pages
/// with their children indented, then the trash.
pub fn print_pages(pages: &[DisplayPage]) {
    if pages.is_empty() {
        println!("No pages found.");
        return;
    }

    let has_favorites = pages
        .iter()
        .any(|dp| matches!(dp.index, DisplayIndex::Favorite(_)));
    if has_favorites {
        println!();
    }

    let mut last_was_favorite = false;
    for dp in pages {
        let is_favorite_entry = matches!(dp.index, DisplayIndex::Favorite(_));
        if last_was_favorite && !is_favorite_entry {
            println!();
        }
        last_was_favorite = is_favorite_entry;

        print_page_line(dp, 0);
    }
}

fn print_page_line(dp: &DisplayPage, depth: usize) {
    let is_favorite_entry = matches!(dp.index, DisplayIndex::Favorite(_));

    let idx_str = format!("{}. ", dp.index);
    let indent = "  ".repeat(depth);

    let left_prefix = if is_favorite_entry {
        format!("  {} {}", FAV_MARKER, indent)
    } else {
        format!("    {}", indent)
    };

    // the regular entry of a favorite gets a trailing star instead
    let right_suffix = if dp.page.is_favorite && !is_favorite_entry {
        format!("{} ", FAV_MARKER)
    } else {
        "  ".to_string()
    };

    let time_ago = format_time_ago(dp.page.updated_at);

    let title_with_icon = format!("{} {}", dp.page.icon, dp.page.title);
    let fixed_width =
        left_prefix.width() + idx_str.width() + right_suffix.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let title_display = truncate_to_width(&title_with_icon, available);
    let padding = available.saturating_sub(title_display.width());

    let idx_colored = match dp.index {
        DisplayIndex::Favorite(_) => idx_str.yellow(),
        DisplayIndex::Trashed(_) => idx_str.red(),
        DisplayIndex::Regular(_) => idx_str.normal(),
    };

    println!(
        "{}{}{}{}{}{}",
        left_prefix,
        idx_colored,
        title_display,
        " ".repeat(padding),
        right_suffix,
        time_ago.dimmed()
    );

    // favorites are duplicates; their subtree prints under the regular entry
    if !is_favorite_entry {
        for child in &dp.children {
            print_page_line(child, depth + 1);
        }
    }
}

/// Prints full pages, blocks rendered one per line in a plain text
/// approximation of the editor.
pub fn print_full_pages(pages: &[DisplayPage]) {
    for (i, dp) in pages.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {} {}",
            dp.index.to_string().yellow(),
            dp.page.icon,
            dp.page.title.bold()
        );
        if let Some(cover) = &dp.page.cover_image {
            println!("{}", format!("[cover: {}]", cover).dimmed());
        }
        println!("--------------------------------");
        for block in &dp.page.blocks {
            println!("{}", render_block(block));
        }
    }
}

fn render_block(block: &Block) -> String {
    let content = block.content();
    match block.kind() {
        BlockKind::Text => content.to_string(),
        BlockKind::Heading1 => format!("# {}", content).bold().to_string(),
        BlockKind::Heading2 => format!("## {}", content).bold().to_string(),
        BlockKind::BulletList => format!("• {}", content),
        BlockKind::Todo => {
            let mark = if block.checked() == Some(true) { "x" } else { " " };
            format!("[{}] {}", mark, content)
        }
        BlockKind::Quote => format!("> {}", content).italic().to_string(),
        BlockKind::Image => format!("[image: {}]", content).dimmed().to_string(),
    }
}

pub fn print_feed(items: &[FeedItem]) {
    for (i, item) in items.iter().enumerate() {
        let header = format!(
            "{}. [{}] {}",
            i + 1,
            item.kind.to_string().cyan(),
            item.title.bold()
        );
        let likes = format!("♥ {}", item.likes).red();
        let time_ago = format_time_ago(item.created_at).dimmed();
        println!("{} {} {}", header, likes, time_ago);

        if !item.description.is_empty() {
            println!("   {}", item.description);
        }
        let mut meta = Vec::new();
        if !item.author_name.is_empty() {
            meta.push(format!("by {}", item.author_name));
        }
        if !item.tags.is_empty() {
            meta.push(item.tags.join(", "));
        }
        if !meta.is_empty() {
            println!("   {}", meta.join(" · ").dimmed());
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeflowapp::model::BlockBody;

    fn block(body: BlockBody) -> Block {
        Block {
            id: "b".into(),
            body,
        }
    }

    #[test]
    fn renders_block_kinds() {
        colored::control::set_override(false);

        assert_eq!(
            render_block(&block(BlockBody::Text {
                content: "plain".into()
            })),
            "plain"
        );
        assert_eq!(
            render_block(&block(BlockBody::Heading1 {
                content: "Title".into()
            })),
            "# Title"
        );
        assert_eq!(
            render_block(&block(BlockBody::BulletList {
                content: "item".into()
            })),
            "• item"
        );
        assert_eq!(
            render_block(&block(BlockBody::Todo {
                content: "task".into(),
                checked: true
            })),
            "[x] task"
        );
        assert_eq!(
            render_block(&block(BlockBody::Todo {
                content: "task".into(),
                checked: false
            })),
            "[ ] task"
        );
        assert_eq!(
            render_block(&block(BlockBody::Quote {
                content: "wise".into()
            })),
            "> wise"
        );
        assert_eq!(
            render_block(&block(BlockBody::Image {
                content: "https://img/a.png".into()
            })),
            "[image: https://img/a.png]"
        );

        colored::control::unset_override();
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 20), "short");
        let long = "a very long page title that overflows";
        let truncated = truncate_to_width(long, 10);
        assert!(truncated.ends_with('…'));
        assert!(truncated.width() <= 10);
    }
}
