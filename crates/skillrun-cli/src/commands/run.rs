use std::collections::HashMap;
use std::io::{IsTerminal, Read};

use skillrun_config::SkillrunConfig;
use skillrun_engine::Dispatcher;

pub(super) async fn cmd_run(
    config: SkillrunConfig,
    name: &str,
    input: Vec<(String, String)>,
) -> skillrun_core::Result<()> {
    let overrides: HashMap<String, String> = input.into_iter().collect();
    let piped = read_piped_stdin()?;

    let backend = skillrun_backend::from_config(&config.backend)?;
    let dispatcher = Dispatcher::from_config(&config, Some(backend))?;

    let outcome = dispatcher.run(name, &overrides, piped.as_deref()).await?;
    println!("{}", outcome.text);
    Ok(())
}

/// Read piped stdin when present. A terminal stdin means nothing was piped,
/// and so does an empty redirect like `< /dev/null`. Anything else — even a
/// lone newline — is a piped value, and binds (or fails as an ambiguous
/// pipe) accordingly.
fn read_piped_stdin() -> skillrun_core::Result<Option<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut content = String::new();
    stdin.lock().read_to_string(&mut content)?;
    Ok(piped_value(content))
}

fn piped_value(content: String) -> Option<String> {
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Make a dispatcher without a backend, for commands that never call one.
pub(super) fn offline_dispatcher(config: &SkillrunConfig) -> skillrun_core::Result<Dispatcher> {
    Dispatcher::from_config(config, None)
}

#[cfg(test)]
mod tests {
    use super::piped_value;

    #[test]
    fn only_truly_empty_stdin_counts_as_no_pipe() {
        assert_eq!(piped_value(String::new()), None);
        // A whitespace-only pipe is still a pipe: it must reach the
        // dispatcher so multi-input skills reject it as ambiguous.
        assert_eq!(piped_value("\n".to_string()), Some("\n".to_string()));
        assert_eq!(piped_value("  ".to_string()), Some("  ".to_string()));
        assert_eq!(
            piped_value("diff text\n".to_string()),
            Some("diff text\n".to_string())
        );
    }
}
