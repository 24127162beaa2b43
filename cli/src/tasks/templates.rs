//! Template rendering into the generated directory.
use anyhow::Result;
use std::path::Path;

use super::{Context, Task, TaskResult};
use crate::error::SetupError;
use crate::resources::template::{self, TemplateBindings};

/// Choices offered when a generated file already exists.
pub const REGENERATE_CHOICES: &str =
    "[r]egenerate and overwrite, [l]eave existing file alone, or [q]uit";

/// Render templates into the generated directory.
#[derive(Debug)]
pub struct RenderTemplates;

impl Task for RenderTemplates {
    fn name(&self) -> &str {
        "Render templates"
    }

    /// Applies only when the repository has templates; a walk error is left
    /// for `run` to report.
    fn should_run(&self, ctx: &Context) -> bool {
        !matches!(
            template::discover(&ctx.settings.root, &ctx.settings.options.template_suffix),
            Ok(templates) if templates.is_empty()
        )
    }

    fn run(&self, ctx: &mut Context) -> Result<TaskResult> {
        let templates = template::discover(
            &ctx.settings.root,
            &ctx.settings.options.template_suffix,
        )?;
        if templates.is_empty() {
            return Ok(TaskResult::Skipped("no templates found".to_string()));
        }

        let generated = ctx.settings.generated_dir();
        ctx.fs_ops.create_dir_all(&generated)?;
        let bindings = TemplateBindings::from_process(&ctx.settings);

        let (mut rendered, mut left) = (0usize, 0usize);
        for tpl in &templates {
            let output = tpl.output_path(&generated);
            let exists = ctx.fs_ops.entry_exists(&output);
            if exists && !ask_regenerate(ctx, &output)? {
                ctx.log
                    .info(&format!("Leaving {} alone", output.display()));
                left += 1;
                continue;
            }

            let contents = template::render(tpl, &bindings, ctx.fs_ops.as_ref())?;
            ctx.fs_ops.write(&output, &contents)?;
            let verb = if exists { "Regenerated" } else { "Generated" };
            ctx.log.info(&format!("{verb} {}", output.display()));
            rendered += 1;
        }

        Ok(TaskResult::Ok(format!(
            "{rendered} rendered, {left} left alone"
        )))
    }
}

/// Returns `true` to regenerate, `false` to leave the file alone.
fn ask_regenerate(ctx: &mut Context, output: &Path) -> Result<bool> {
    let question = format!(
        "GENERATED file already exists: {}, what do you want to do?",
        output.display()
    );
    let answer = ctx
        .prompter
        .ask(&question, REGENERATE_CHOICES)?
        .ok_or(SetupError::InputClosed)?;
    match answer.as_str() {
        "r" => Ok(true),
        "l" => Ok(false),
        "q" => Err(SetupError::Aborted.into()),
        _ => Err(SetupError::UnrecognizedChoice(answer).into()),
    }
}
