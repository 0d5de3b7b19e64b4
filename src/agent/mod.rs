// src/agent/mod.rs

use crate::config::AgentConfig;
use crate::context::Context;
use crate::device::DeviceProbe;
use crate::error::{AgentError, AgentResult};
use crate::model::ModelLoader;
use crate::protocol::{ModelPlanner, Plan, Planner, RunSummary};
use crate::tools::ToolResult;
use crate::trace::Trace;
use crate::validation::{is_shell_command, matching_pattern};
use colored::Colorize;
use std::io::Write;

/// Step names written to the trace log, in pipeline order.
pub mod steps {
    pub const INSTRUCTION_RECEIVED: &str = "Instruction received";
    pub const CUDA_NOT_AVAILABLE: &str = "CUDA not available";
    pub const MODEL_LOADING_FAILED: &str = "Model loading failed";
    pub const MODEL_LOADED: &str = "Model loaded";
    pub const PLAN_GENERATED: &str = "Plan generated";
    pub const CHECKING_FIRST_STEP: &str = "Checking first step for shell command";
    pub const DRY_RUN_EXECUTED: &str = "Dry run executed";
    pub const DRY_RUN_DISABLED: &str = "Dry run disabled";
    pub const FIRST_STEP_NOT_SHELL: &str = "First step not a shell command";
    pub const PLAN_IS_EMPTY: &str = "Plan is empty";
    pub const PROCESS_COMPLETED: &str = "Process completed";
}

pub trait Agent {
    fn run(&mut self, instruction: &str) -> AgentResult<RunSummary>;
}

/// The instruction → plan → dry-run pipeline.
///
/// Console text goes to `out`; every step is also recorded in the context's trace.
pub struct CliAgent<P, L, T, W>
where
    P: DeviceProbe,
    L: ModelLoader,
    T: Trace,
    W: Write,
{
    pub config: AgentConfig,
    pub probe: P,
    pub loader: L,
    pub context: Context<T>,
    pub out: W,
}

impl<P, L, T, W> CliAgent<P, L, T, W>
where
    P: DeviceProbe,
    L: ModelLoader,
    T: Trace,
    W: Write,
{
    pub fn new(config: AgentConfig, probe: P, loader: L, trace: T, out: W) -> Self {
        Self {
            config,
            probe,
            loader,
            context: Context::dry_run(trace),
            out,
        }
    }

    fn report_missing_gpu(&mut self) -> AgentResult<()> {
        writeln!(
            self.out,
            "{}",
            "CUDA is not available. This model requires a GPU for efficient execution.".red()
        )?;
        writeln!(
            self.out,
            "Please ensure you have a CUDA-enabled GPU and the necessary drivers/libraries installed."
        )?;
        Ok(())
    }

    fn report_load_failure(&mut self, err: &AgentError) -> AgentResult<()> {
        writeln!(self.out, "{}", format!("Error loading model or tokenizer: {err}").red())?;
        writeln!(
            self.out,
            "Please ensure the '{}' directory exists and contains the model files.",
            self.config.model_path.display()
        )?;
        writeln!(self.out, "\nNote: if loading keeps failing, please ensure:")?;
        writeln!(
            self.out,
            "1. You have a compatible CUDA toolkit and drivers installed for your GPU."
        )?;
        writeln!(
            self.out,
            "2. The inference server at {} is running and serves the model.",
            self.config.endpoint
        )?;
        writeln!(
            self.out,
            "3. The model files in the specified path are not corrupted and have correct permissions."
        )?;
        Ok(())
    }

    fn print_plan(&mut self, plan: &Plan) -> AgentResult<()> {
        writeln!(self.out, "\n{}", "Generated Plan:".bold())?;
        if plan.is_empty() {
            writeln!(self.out, "Could not generate a plan.")?;
        }
        for (i, step) in plan.steps.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, step)?;
        }
        Ok(())
    }

    /// Hand `command` to the dry-run tool. `None` when dry-run mode is off.
    fn dry_run(&mut self, command: &str) -> AgentResult<Option<ToolResult>> {
        if !self.context.dry_run {
            writeln!(
                self.out,
                "{}",
                "Dry-run mode is disabled. The command was not passed to any tool.".yellow()
            )?;
            return Ok(None);
        }
        writeln!(self.out, "Executing in dry-run mode: {}", command.cyan())?;

        let result = match self.context.get_tool("dry_run") {
            Some(tool) => tool.execute(command),
            None => ToolResult::failure("Tool not found: dry_run"),
        };

        match (&result.output, &result.error) {
            (Some(output), _) => writeln!(self.out, "{output}")?,
            (None, Some(err)) => {
                tracing::warn!("dry run failed: {err}");
                writeln!(self.out, "{}", err.red())?;
            }
            (None, None) => {}
        }
        Ok(Some(result))
    }
}

impl<P, L, T, W> Agent for CliAgent<P, L, T, W>
where
    P: DeviceProbe,
    L: ModelLoader,
    T: Trace,
    W: Write,
{
    fn run(&mut self, instruction: &str) -> AgentResult<RunSummary> {
        self.context.log(steps::INSTRUCTION_RECEIVED, instruction)?;
        writeln!(self.out, "{} {}", "Instruction received:".bold(), instruction)?;

        if self.config.require_gpu && !self.probe.gpu_available() {
            self.report_missing_gpu()?;
            self.context
                .log(steps::CUDA_NOT_AVAILABLE, "Model requires CUDA-enabled GPU.")?;
            return Err(AgentError::GpuUnavailable);
        }

        let model_path = self.config.model_path.clone();
        writeln!(self.out, "Loading model from {}...", model_path.display())?;
        let model = match self.loader.load(&model_path) {
            Ok(model) => model,
            Err(e) => {
                self.report_load_failure(&e)?;
                self.context
                    .log(steps::MODEL_LOADING_FAILED, format!("Error: {e}"))?;
                return Err(e);
            }
        };
        writeln!(self.out, "Loading tokenizer from {}...", model_path.display())?;
        writeln!(self.out, "Model and tokenizer loaded.")?;
        self.context.log(
            steps::MODEL_LOADED,
            "Fine-tuned model and tokenizer loaded successfully.",
        )?;

        writeln!(self.out, "Generating plan...")?;
        let planner = ModelPlanner::new(model, self.config.max_new_tokens);
        let plan = planner.generate_plan(instruction);
        self.context
            .log(steps::PLAN_GENERATED, plan.steps.as_slice())?;
        self.print_plan(&plan)?;

        let dry_run = match plan.first_step() {
            Some(first) if is_shell_command(first) => {
                tracing::debug!(pattern = ?matching_pattern(first), "first step looks like a shell command");
                self.context.log(steps::CHECKING_FIRST_STEP, first)?;
                let result = self.dry_run(first)?;
                match &result {
                    Some(_) => self.context.log(steps::DRY_RUN_EXECUTED, first)?,
                    None => self.context.log(steps::DRY_RUN_DISABLED, first)?,
                }
                result
            }
            first => {
                writeln!(
                    self.out,
                    "\nFirst step is not a recognized shell command or plan is empty. No dry-run executed."
                )?;
                match first {
                    Some(step) => self.context.log(steps::FIRST_STEP_NOT_SHELL, step)?,
                    None => self.context.log(steps::PLAN_IS_EMPTY, "No plan generated")?,
                }
                None
            }
        };

        self.context
            .log(steps::PROCESS_COMPLETED, "Plan generated and processed.")?;
        writeln!(
            self.out,
            "\nAgent process completed. Check {} for details.",
            self.config.log_file.display()
        )?;

        Ok(RunSummary { plan, dry_run })
    }
}
