//! End-to-end lifecycle tests through the API facade, on the in-memory
//! store: create, edit blocks, organize, trash, restore, purge.

use lifeflowapp::api::{BlockOp, LifeflowApi, PageFilter, PageStatusFilter, PageUpdate};
use lifeflowapp::model::BlockKind;
use lifeflowapp::store::memory::InMemoryStore;

fn api() -> LifeflowApi<InMemoryStore> {
    LifeflowApi::new(InMemoryStore::new())
}

#[test]
fn full_note_taking_session() {
    let mut api = api();

    // create a page and build up content
    api.create_page(Some("Sprint Planning".into()), None).unwrap();
    api.edit_page(
        "1",
        BlockOp::Set {
            position: 1,
            content: "Goals for the week".into(),
        },
    )
    .unwrap();
    api.edit_page(
        "1",
        BlockOp::Convert {
            position: 1,
            kind: BlockKind::Heading1,
        },
    )
    .unwrap();
    api.edit_page(
        "1",
        BlockOp::Append {
            kind: BlockKind::Todo,
            content: Some("Ship the parser".into()),
        },
    )
    .unwrap();
    api.edit_page(
        "1",
        BlockOp::Append {
            kind: BlockKind::Todo,
            content: Some("Write release notes".into()),
        },
    )
    .unwrap();
    api.edit_page(
        "1",
        BlockOp::Check {
            position: 2,
            checked: true,
        },
    )
    .unwrap();

    let viewed = api.view_pages(&["1"]).unwrap();
    let page = &viewed.listed_pages[0].page;
    assert_eq!(page.blocks.len(), 3);
    assert_eq!(page.blocks[0].kind(), BlockKind::Heading1);
    assert_eq!(page.blocks[0].content(), "Goals for the week");
    assert_eq!(page.blocks[1].checked(), Some(true));
    assert_eq!(page.blocks[2].checked(), Some(false));

    // move the finished todo to the bottom
    api.edit_page("1", BlockOp::Move { from: 2, to: 3 }).unwrap();
    let viewed = api.view_pages(&["1"]).unwrap();
    let page = &viewed.listed_pages[0].page;
    assert_eq!(page.blocks[2].content(), "Ship the parser");
}

#[test]
fn organizing_pages_with_nesting_and_favorites() {
    let mut api = api();

    api.create_page(Some("Work".into()), None).unwrap();
    api.create_page(Some("1:1 Notes".into()), Some("1")).unwrap();
    api.create_page(Some("Personal".into()), None).unwrap();

    // star the work page; it shows in both lists
    api.favorite_pages(&["2"]).unwrap();

    let favorites = api
        .get_pages(PageFilter {
            status: PageStatusFilter::Favorites,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(favorites.listed_pages.len(), 1);
    assert_eq!(favorites.listed_pages[0].page.title, "Work");

    let active = api.get_pages(PageFilter::default()).unwrap();
    assert_eq!(active.listed_pages.len(), 2);
    let work = active
        .listed_pages
        .iter()
        .find(|dp| dp.page.title == "Work")
        .unwrap();
    assert_eq!(work.children.len(), 1);
    assert_eq!(work.children[0].page.title, "1:1 Notes");
}

#[test]
fn trash_restore_and_purge_lifecycle() {
    let mut api = api();

    api.create_page(Some("Keeper".into()), None).unwrap();
    api.create_page(Some("Draft".into()), None).unwrap();

    // "Draft" is the newest, so index 1
    api.trash_pages(&["1"]).unwrap();

    let active = api.get_pages(PageFilter::default()).unwrap();
    assert_eq!(active.listed_pages.len(), 1);
    assert_eq!(active.listed_pages[0].page.title, "Keeper");

    let trashed = api
        .get_pages(PageFilter {
            status: PageStatusFilter::Trashed,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(trashed.listed_pages.len(), 1);
    assert_eq!(trashed.listed_pages[0].page.title, "Draft");

    // bring it back, then trash and purge it for good
    api.restore_pages(&["1"]).unwrap();
    assert_eq!(api.get_pages(PageFilter::default()).unwrap().listed_pages.len(), 2);

    api.trash_pages(&["1"]).unwrap();
    api.purge_pages(&[] as &[&str]).unwrap();

    let all = api
        .get_pages(PageFilter {
            status: PageStatusFilter::All,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(all.listed_pages.len(), 1);
    assert_eq!(all.listed_pages[0].page.title, "Keeper");
}

#[test]
fn trashing_a_parent_keeps_children_under_it() {
    let mut api = api();

    api.create_page(Some("Projects".into()), None).unwrap();
    api.create_page(Some("Archive Me".into()), Some("1")).unwrap();

    api.trash_pages(&["1"]).unwrap();

    let trashed = api
        .get_pages(PageFilter {
            status: PageStatusFilter::Trashed,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(trashed.listed_pages.len(), 1);
    assert_eq!(trashed.listed_pages[0].page.title, "Projects");
    // the child is visible under its trashed parent
    assert_eq!(trashed.listed_pages[0].children.len(), 1);
    assert_eq!(trashed.listed_pages[0].children[0].page.title, "Archive Me");

    // purging the parent takes the child with it
    api.purge_pages(&["1"]).unwrap();
    let all = api
        .get_pages(PageFilter {
            status: PageStatusFilter::All,
            ..Default::default()
        })
        .unwrap();
    assert!(all.listed_pages.is_empty());
}

#[test]
fn metadata_updates_do_not_disturb_blocks() {
    let mut api = api();
    api.create_page(Some("Styled".into()), None).unwrap();
    api.edit_page(
        "1",
        BlockOp::Set {
            position: 1,
            content: "body".into(),
        },
    )
    .unwrap();

    api.update_page(
        "1",
        PageUpdate {
            title: Some("Restyled".into()),
            icon: Some("🎨".into()),
            cover_image: Some("https://img/banner.png".into()),
        },
    )
    .unwrap();

    let viewed = api.view_pages(&["1"]).unwrap();
    let page = &viewed.listed_pages[0].page;
    assert_eq!(page.title, "Restyled");
    assert_eq!(page.icon, "🎨");
    assert_eq!(page.cover_image.as_deref(), Some("https://img/banner.png"));
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].content(), "body");
}

#[test]
fn title_selectors_work_across_commands() {
    let mut api = api();
    api.create_page(Some("Reading List".into()), None).unwrap();
    api.create_page(Some("Chores".into()), None).unwrap();

    let viewed = api.view_pages(&["reading"]).unwrap();
    assert_eq!(viewed.listed_pages[0].page.title, "Reading List");

    api.trash_pages(&["chores"]).unwrap();
    let active = api.get_pages(PageFilter::default()).unwrap();
    assert_eq!(active.listed_pages.len(), 1);
}
