use skillrun_config::SkillrunConfig;

use super::run::offline_dispatcher;

pub(super) fn cmd_list(config: &SkillrunConfig, verbose: bool) -> skillrun_core::Result<()> {
    let dispatcher = offline_dispatcher(config)?;
    let skills = dispatcher.list()?;

    if skills.is_empty() {
        println!("No skills found.");
        println!("  Create one with: skillrun create <name>");
        return Ok(());
    }

    println!("\x1b[1mAvailable Skills ({}):\x1b[0m\n", skills.len());
    for s in &skills {
        println!("  \x1b[36m{}\x1b[0m", s.name);
        println!("    {}", s.description);
        if verbose {
            if !s.inputs.is_empty() {
                println!("    Inputs: {}", s.inputs.join(", "));
            }
            println!("    File: {}", s.path.display());
        }
        println!();
    }
    Ok(())
}

pub(super) fn cmd_show(config: &SkillrunConfig, name: &str) -> skillrun_core::Result<()> {
    let dispatcher = offline_dispatcher(config)?;
    let skill = dispatcher.show(name)?;

    println!("\x1b[1m{}\x1b[0m", skill.name);
    println!("  {}", skill.description);
    println!("  Output: {}", skill.output.format);
    println!("  File: {}", skill.path.display());

    if skill.inputs.is_empty() {
        println!("\n  No declared inputs.");
    } else {
        println!("\n  \x1b[1mInputs:\x1b[0m");
        for (input_name, spec) in &skill.inputs {
            let required = if spec.required { " (required)" } else { "" };
            println!("    \x1b[36m{input_name}\x1b[0m{required}");
            if !spec.description.is_empty() {
                println!("      {}", spec.description);
            }
            if let Some(ref command) = spec.command {
                println!("      Gathered by: {command}");
            }
        }
    }

    println!("\n  \x1b[1mTemplate:\x1b[0m");
    for line in skill.template.lines() {
        println!("    {line}");
    }
    Ok(())
}

pub(super) fn cmd_create(config: &SkillrunConfig, name: &str) -> skillrun_core::Result<()> {
    let cwd = std::env::current_dir()?;
    let project_root = if config.skills.project_dir.is_absolute() {
        config.skills.project_dir.clone()
    } else {
        cwd.join(&config.skills.project_dir)
    };

    let skill_dir = project_root.join(name);
    let skill_path = skill_dir.join(skillrun_skills::SKILL_FILE);
    if skill_path.exists() {
        return Err(skillrun_core::SkillError::Config(format!(
            "skill '{}' already exists at {}",
            name,
            skill_path.display()
        )));
    }

    std::fs::create_dir_all(&skill_dir)?;
    let template = format!(
        r#"---
name: {name}
description: Describe what this skill does
inputs:
  topic:
    description: What the prompt is about
    required: false
output:
  format: text
---

Write a short summary of the following topic:

{{{{topic}}}}
"#
    );
    std::fs::write(&skill_path, template)?;

    println!("✅ Created skill template at {}", skill_path.display());
    println!("   Edit the SKILL.md, then try: skillrun run {name}");
    Ok(())
}
