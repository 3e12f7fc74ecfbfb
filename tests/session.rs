//! Tests for the editor session: change events, persistence and regeneration.
mod common;
use common::*;
use kumiki::prelude::*;
use kumiki::workspace::storage::{self, STORAGE_KEY};
use pretty_assertions::assert_eq;

fn hello() -> Block {
    Block::new(BlockKind::Print)
        .with_id("p1")
        .with_input("VALUE", Block::text("hello"))
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_empty_store() {
        let registry = registry();
        let session = EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
            .expect("session should open");
        assert!(session.workspace().is_empty());
        assert_eq!(session.code(), "");
    }

    #[test]
    fn test_open_loads_stored_workspace() {
        let registry = registry();
        let mut store = MemoryStore::new();
        storage::save(&Workspace::new().with_block(hello()), &mut store).expect("save");

        let session = EditorSession::open(&registry, store, GeneratorOptions::bare())
            .expect("session should open");
        assert_eq!(session.workspace().top_blocks.len(), 1);
        assert_eq!(session.code(), "print('hello')\n");
    }

    #[test]
    fn test_ui_events_are_ignored() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
                .expect("session should open");

        session
            .edit(|ws| ws.top_blocks.push(hello()), ChangeEvent::Ui)
            .expect("ui event");
        assert_eq!(session.store().get(STORAGE_KEY), Ok(None));
        assert_eq!(session.code(), "");
    }

    #[test]
    fn test_block_events_save_and_regenerate() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
                .expect("session should open");

        session
            .edit(
                |ws| ws.top_blocks.push(hello()),
                ChangeEvent::BlockCreate {
                    block_id: "p1".to_string(),
                },
            )
            .expect("create event");
        assert_eq!(session.code(), "print('hello')\n");

        let stored = storage::load(session.store(), &registry).expect("load");
        assert_eq!(stored.as_ref(), Some(session.workspace()));
    }

    #[test]
    fn test_drags_save_without_regenerating() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
                .expect("session should open");

        session.set_dragging(true);
        assert!(session.is_dragging());
        session
            .edit(
                |ws| ws.top_blocks.push(hello()),
                ChangeEvent::BlockMove {
                    block_id: "p1".to_string(),
                },
            )
            .expect("move event");
        assert_eq!(session.code(), "");
        assert!(session.store().get(STORAGE_KEY).expect("get").is_some());

        session.set_dragging(false);
        session
            .handle_event(&ChangeEvent::BlockMove {
                block_id: "p1".to_string(),
            })
            .expect("drop event");
        assert_eq!(session.code(), "print('hello')\n");
    }

    #[test]
    fn test_finished_loading_saves_without_regenerating() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
                .expect("session should open");

        session
            .edit(|ws| ws.top_blocks.push(hello()), ChangeEvent::FinishedLoading)
            .expect("loading event");
        assert_eq!(session.code(), "");
        assert!(session.store().get(STORAGE_KEY).expect("get").is_some());
    }

    #[test]
    fn test_import_replaces_and_regenerates() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
                .expect("session should open");

        session.import(SIMPLE_WORKSPACE_JSON).expect("import");
        assert_eq!(
            session.code(),
            "person = {'name': 'Ada', 'age': 36}\nprint(person['name'])\n"
        );

        let exported = session.export().expect("export");
        let mut round_trip = Workspace::new();
        storage::import_workspace(&mut round_trip, &exported, &registry).expect("re-import");
        assert_eq!(&round_trip, session.workspace());
    }

    #[test]
    fn test_failed_import_leaves_session_unchanged() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::bare())
                .expect("session should open");
        session.import(SIMPLE_WORKSPACE_JSON).expect("import");
        let workspace = session.workspace().clone();
        let code = session.code().to_string();
        let stored = session.store().get(STORAGE_KEY).expect("get");

        assert!(session.import("{\"blocks\": 3}").is_err());
        assert_eq!(session.workspace(), &workspace);
        assert_eq!(session.code(), code);
        assert_eq!(session.store().get(STORAGE_KEY).expect("get"), stored);
    }

    #[test]
    fn test_clear() {
        let registry = registry();
        let mut session =
            EditorSession::open(&registry, MemoryStore::new(), GeneratorOptions::default())
                .expect("session should open");
        session.import(LLM_WORKSPACE_JSON).expect("import");
        assert!(session.code().contains("from langchain_openai import ChatOpenAI"));

        session.clear().expect("clear");
        assert!(session.workspace().is_empty());
        assert_eq!(session.code(), format!("{}\n", kumiki::config::DEFAULT_HEADER));
        let stored = storage::load(session.store(), &registry).expect("load");
        assert_eq!(stored, Some(Workspace::new()));
    }

    #[test]
    fn test_event_kinds() {
        assert!(ChangeEvent::Ui.is_ui());
        assert!(!ChangeEvent::FinishedLoading.is_ui());
        assert!(
            !ChangeEvent::VarRename {
                var_id: "v1".to_string()
            }
            .is_ui()
        );
    }
}
