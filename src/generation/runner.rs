//! Template runner - renders every template in a directory against a catalog
//!
//! Each template gets its own sink, duplicate filter and helper set, so one
//! template body can fan out into any number of files without leaking state
//! into the next template. Templates render one after another; the first
//! failure stops the run and later templates are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tracing::{debug, info};

use crate::definitions::ServiceCatalog;
use crate::generation::sink::create_dir_all_with_mode;
use crate::generation::{
    DuplicateFilter, GenerationError, HelperRegistry, MultiFileSink, RenderContext, SharedSink,
};

/// Suffix identifying template files when none is configured
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".tmpl";

/// Permission bits for the output root when the runner has to create it
const OUTPUT_DIR_MODE: u32 = 0o700;

/// Where templates come from and where their output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_suffix: String,
}

impl RunnerConfig {
    pub fn new(template_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.template_suffix = suffix.into();
        self
    }
}

/// Files produced by one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutput {
    /// Logical template name (file name without the suffix)
    pub template: String,
    pub files: Vec<PathBuf>,
}

/// Result of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub templates: Vec<TemplateOutput>,
}

impl GenerationReport {
    /// Every file written, in render order
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.templates
            .iter()
            .flat_map(|output| output.files.iter().map(PathBuf::as_path))
    }
}

/// Discovers and renders templates
pub struct TemplateRunner {
    config: RunnerConfig,
}

impl TemplateRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Logical names of the templates in the template directory, sorted.
    ///
    /// Only regular files directly inside the directory whose name ends with
    /// the configured suffix count.
    pub fn discover(&self) -> Result<Vec<String>, GenerationError> {
        let dir = &self.config.template_dir;
        let discovery_error = |source| GenerationError::Discovery {
            dir: dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(discovery_error)? {
            let entry = entry.map_err(discovery_error)?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(self.config.template_suffix.as_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Render every discovered template against `catalog`
    pub fn run(&self, catalog: &ServiceCatalog) -> Result<GenerationReport, GenerationError> {
        let templates = self.discover()?;
        info!(
            count = templates.len(),
            template_dir = %self.config.template_dir.display(),
            "Discovered templates"
        );

        let context = RenderContext::from_catalog(catalog)?.to_tera_context();

        let mut report = GenerationReport::default();
        for template in templates {
            info!(template = %template, "Rendering template");
            let files = self.render_template(&template, &context)?;
            info!(template = %template, files = files.len(), "Rendered template");
            report.templates.push(TemplateOutput { template, files });
        }
        Ok(report)
    }

    fn render_template(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        let sink = SharedSink::new(MultiFileSink::new(&self.config.output_dir));
        let helpers = HelperRegistry::new(sink.clone(), DuplicateFilter::new());

        let result = self.execute(template, context, &sink, &helpers);
        sink.close();
        result.map(|()| sink.files_written())
    }

    fn execute(
        &self,
        template: &str,
        context: &Context,
        sink: &SharedSink,
        helpers: &HelperRegistry,
    ) -> Result<(), GenerationError> {
        self.ensure_output_dir()?;

        let path = self.template_path(template);
        debug!(path = %path.display(), "Loading template");
        let content = fs::read_to_string(&path)?;

        let mut tera = Tera::default();
        // Output is source code, not HTML
        tera.autoescape_on(vec![]);
        helpers.register(&mut tera);
        debug!(helpers = ?HelperRegistry::function_names(), "Registered template helpers");
        tera.add_raw_template(template, &content)
            .map_err(|e| GenerationError::Parse {
                template: template.to_string(),
                source: e,
            })?;

        tera.render_to(template, context, sink.clone())
            .map_err(|e| GenerationError::Render {
                template: template.to_string(),
                current_file: sink.current_file(),
                files_written: sink.files_written(),
                source: e,
            })
    }

    fn ensure_output_dir(&self) -> Result<(), GenerationError> {
        let dir = &self.config.output_dir;
        if dir.exists() {
            return Ok(());
        }
        info!(path = %dir.display(), "Creating output directory");
        create_dir_all_with_mode(dir, OUTPUT_DIR_MODE).map_err(|e| GenerationError::OutputRoot {
            dir: dir.clone(),
            source: e,
        })
    }

    fn template_path(&self, template: &str) -> PathBuf {
        self.config
            .template_dir
            .join(format!("{template}{}", self.config.template_suffix))
    }
}
