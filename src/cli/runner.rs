//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::JobConfig;
use crate::error::{Error, Result, ResultExt};
use crate::handler::FileStorageHandler;
use crate::loader::load_job_config;
use crate::location::validate_write_request;
use crate::types::{keys, JobProperties};
use serde_json::{json, Value};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Resolve {
                dynamic_job_id,
                output_id,
                properties,
            } => self.resolve(dynamic_job_id.as_deref(), output_id.as_deref(), *properties),
            Commands::Project => self.project(),
            Commands::Validate => self.validate(),
        }
    }

    /// Load job definition
    fn load_job(&self) -> Result<JobConfig> {
        let path = self
            .cli
            .job
            .as_ref()
            .ok_or_else(|| Error::config("Job file not specified (use -j flag)"))?;
        debug!(path = %path.display(), "Loading job definition");
        load_job_config(path).with_context(|| format!("Job file '{}'", path.display()))
    }

    /// Resolve the output location
    fn resolve(
        &self,
        dynamic_job_id: Option<&str>,
        output_id: Option<&str>,
        all_properties: bool,
    ) -> Result<()> {
        let mut job = self.load_job()?;
        if let Some(id) = dynamic_job_id {
            job.job.dynamic_job_id = Some(id.to_string());
        }
        if let Some(id) = output_id {
            job.job.output_id = Some(id.to_string());
        }

        let handler = FileStorageHandler::new(job.storage_formats());
        let incoming = job.incoming_properties(handler.codec())?;

        let mut props = JobProperties::new();
        let resolution = handler.configure_output_job_properties(&incoming, &mut props)?;

        let mut output = json!({
            "table": job.table_metadata()?.qualified_name(),
            "plan": resolution.plan.name(),
            "working_directory": resolution.working_directory.to_string(),
            "relative_path": resolution.relative_path,
            "location": resolution.location.to_string(),
            "output_dir": props.get(keys::OUTPUT_DIR),
        });
        if all_properties {
            output["properties"] = json!(props);
        }

        self.emit(&output, || {
            let mut lines = vec![
                format!("Plan:              {}", resolution.plan.name()),
                format!("Working directory: {}", resolution.working_directory),
                format!("Location:          {}", resolution.location),
            ];
            match props.get(keys::OUTPUT_DIR) {
                Some(dir) => lines.push(format!("Output directory:  {dir}")),
                None => lines.push("Output directory:  (deferred to partition discovery)".to_string()),
            }
            if all_properties {
                lines.push(String::new());
                lines.extend(props.iter().map(|(k, v)| format!("{k} = {v}")));
            }
            lines.join("\n")
        })
    }

    /// Project the input schema
    fn project(&self) -> Result<()> {
        let job = self.load_job()?;
        let handler = FileStorageHandler::new(job.storage_formats());
        let incoming = job.incoming_properties(handler.codec())?;

        let mut props = JobProperties::new();
        let projected = handler.configure_input_job_properties(&incoming, &mut props)?;

        let output = json!({
            "columns": projected.column_names,
            "types": projected.column_types,
            "transactional": projected.transactional,
            "properties": props,
        });

        self.emit(&output, || {
            props
                .iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    /// Validate the job definition
    fn validate(&self) -> Result<()> {
        let job = self.load_job()?;
        let descriptor = job.write_descriptor()?;
        let mode = job.dynamic_partition_context().mode()?;
        validate_write_request(&descriptor, &mode)?;

        let output = json!({
            "valid": true,
            "table": descriptor.table.qualified_name(),
            "dynamic": mode.is_dynamic(),
            "dynamic_partition_keys": descriptor.dynamic_partition_keys(),
        });
        self.emit(&output, || {
            format!(
                "Job for {} is valid ({} write)",
                descriptor.table.qualified_name(),
                if mode.is_dynamic() { "dynamic" } else { "static" }
            )
        })
    }

    /// Print in the selected format
    fn emit(&self, value: &Value, pretty: impl FnOnce() -> String) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
            OutputFormat::Pretty => println!("{}", pretty()),
        }
        Ok(())
    }
}
