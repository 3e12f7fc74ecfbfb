use crate::config::GeneratorOptions;
use crate::generator::Generator;
use crate::schema::BlockRegistry;
use crate::workspace::IntoWorkspace;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// A block workspace to Python transpiler.
///
/// The block registry is built once when the instance is created and reused
/// by every call.
#[pyclass(name = "Kumiki")]
struct KumikiPy {
    registry: BlockRegistry,
    options: GeneratorOptions,
}

#[pymethods]
impl KumikiPy {
    /// Creates a transpiler.
    ///
    /// Args:
    ///     options_json (str | None): Generator options as a JSON object, e.g.
    ///         `{"header": null, "include_imports": true}`. Missing keys take
    ///         their defaults.
    ///
    /// Raises:
    ///     ValueError: If the options are not valid JSON.
    ///     RuntimeError: If the block registry fails to build.
    #[new]
    #[pyo3(signature = (options_json=None))]
    fn new(options_json: Option<&str>) -> PyResult<Self> {
        let options = match options_json {
            Some(json) => {
                GeneratorOptions::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?
            }
            None => GeneratorOptions::default(),
        };
        let registry = BlockRegistry::standard().map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(KumikiPy { registry, options })
    }

    /// Transpiles a workspace document into Python source.
    ///
    /// Args:
    ///     workspace_json (str): The serialized workspace.
    ///
    /// Returns:
    ///     str: The generated Python document.
    ///
    /// Raises:
    ///     ValueError: If the document is malformed or fails validation, or if
    ///         a block cannot be emitted.
    fn transpile(&self, workspace_json: &str) -> PyResult<String> {
        let workspace = workspace_json
            .into_workspace(&self.registry)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Generator::builder(&self.registry)
            .with_options(self.options.clone())
            .build()
            .workspace_to_code(&workspace)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Returns whether a workspace document is well formed and valid.
    fn validate(&self, workspace_json: &str) -> bool {
        workspace_json.into_workspace(&self.registry).is_ok()
    }
}

/// Python bindings to the kumiki block workspace transpiler.
#[pymodule]
fn kumiki(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<KumikiPy>()?;
    Ok(())
}
