//! The editor adapter: keeps a workspace, its persisted copy and its generated
//! code in step as change events arrive from the host editor.

use crate::config::GeneratorOptions;
use crate::error::{SessionError, StorageError};
use crate::generator::Generator;
use crate::schema::BlockRegistry;
use crate::workspace::storage::{self, KeyValueStore};
use crate::workspace::Workspace;
use tracing::debug;

/// A change reported by the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Scrolling, zooming, selection and other view-only changes.
    Ui,
    BlockCreate { block_id: String },
    BlockDelete { block_id: String },
    BlockChange { block_id: String },
    BlockMove { block_id: String },
    VarCreate { var_id: String },
    VarDelete { var_id: String },
    VarRename { var_id: String },
    /// The host finished loading a workspace.
    FinishedLoading,
}

impl ChangeEvent {
    pub fn is_ui(&self) -> bool {
        matches!(self, ChangeEvent::Ui)
    }
}

pub struct EditorSession<'r, S: KeyValueStore> {
    registry: &'r BlockRegistry,
    generator: Generator<'r>,
    store: S,
    workspace: Workspace,
    dragging: bool,
    code: String,
}

impl<'r, S: KeyValueStore> EditorSession<'r, S> {
    /// Loads the stored workspace, if any, and generates its code once.
    pub fn open(
        registry: &'r BlockRegistry,
        store: S,
        options: GeneratorOptions,
    ) -> Result<Self, SessionError> {
        let workspace = storage::load(&store, registry)?.unwrap_or_default();
        let mut session = Self {
            registry,
            generator: Generator::builder(registry).with_options(options).build(),
            store,
            workspace,
            dragging: false,
            code: String::new(),
        };
        session.regenerate()?;
        Ok(session)
    }

    /// Applies the host's listener policy: UI events are ignored, everything
    /// else is saved, and code is regenerated unless the event only marks the
    /// end of loading or a drag is in progress.
    pub fn handle_event(&mut self, event: &ChangeEvent) -> Result<(), SessionError> {
        if event.is_ui() {
            return Ok(());
        }
        storage::save(&self.workspace, &mut self.store)?;
        if *event == ChangeEvent::FinishedLoading || self.dragging {
            debug!("skipping regeneration after {:?}", event);
            return Ok(());
        }
        self.regenerate()
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mutates the workspace, then reports `event` for it.
    pub fn edit(
        &mut self,
        change: impl FnOnce(&mut Workspace),
        event: ChangeEvent,
    ) -> Result<(), SessionError> {
        change(&mut self.workspace);
        self.handle_event(&event)
    }

    /// Replaces the workspace with an imported document, then saves and regenerates.
    /// A failed import leaves the session unchanged.
    pub fn import(&mut self, json: &str) -> Result<(), SessionError> {
        storage::import_workspace(&mut self.workspace, json, self.registry)?;
        storage::save(&self.workspace, &mut self.store)?;
        self.regenerate()
    }

    pub fn export(&self) -> Result<String, StorageError> {
        storage::export_workspace(&self.workspace)
    }

    /// Empties the workspace, then saves and regenerates.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.workspace.clear();
        storage::save(&self.workspace, &mut self.store)?;
        self.regenerate()
    }

    /// The code generated by the last regeneration.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn regenerate(&mut self) -> Result<(), SessionError> {
        self.code = self.generator.workspace_to_code(&self.workspace)?;
        Ok(())
    }
}
