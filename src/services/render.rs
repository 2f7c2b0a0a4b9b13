use crate::domain::models::Step;
use crate::guide::{platform_section, Guide, GuideError, PlatformId};

/// Derive the ordered step list for one platform.
///
/// Native dependency names are mentioned only on the install line; the
/// purposes shown by `primer deps` stay out of the rendering so the
/// mention-count property holds by construction.
pub fn render_steps(guide: &Guide, platform: PlatformId) -> Result<Vec<Step>, GuideError> {
    let section = platform_section(guide, platform)?;
    let mut steps = Vec::new();

    let mut toolchain_notes = vec![format!(
        "The {} channel is required.",
        guide.toolchain.channel
    )];
    if guide.toolchain.nightly_compatible {
        toolchain_notes.push("Nightly toolchains are assumed to be compatible.".to_string());
    }
    steps.push(Step {
        id: "toolchain".to_string(),
        title: "Install and update the Rust toolchain".to_string(),
        commands: vec![guide.toolchain.inspect.clone(), guide.toolchain.update.clone()],
        notes: toolchain_notes,
    });

    let dep_names: Vec<&str> = guide.native_deps.iter().map(|d| d.name.as_str()).collect();
    let mut install_commands = vec![format!(
        "{} {}",
        section.install_prefix,
        dep_names.join(" ")
    )];
    if !section.extra_packages.is_empty() {
        install_commands.push(format!(
            "{} {}",
            section.install_prefix,
            section.extra_packages.join(" ")
        ));
    }
    steps.push(Step {
        id: "native-deps".to_string(),
        title: format!("Install native build dependencies ({})", section.package_manager),
        commands: install_commands,
        notes: section.notes.clone(),
    });

    let clone = if guide.repository.submodules {
        format!("git clone --recursive {}", guide.repository.url)
    } else {
        format!("git clone {}", guide.repository.url)
    };
    steps.push(Step {
        id: "source".to_string(),
        title: "Clone the repository".to_string(),
        commands: vec![clone],
        notes: vec![],
    });

    if !section.pins.is_empty() {
        let mut notes = Vec::new();
        for pin in &section.pins {
            let mut line = format!("Set {} = \"{}\" in {}.", pin.dependency, pin.pin, pin.file);
            if let Some(reason) = &pin.reason {
                line.push_str(&format!(" ({})", reason));
            }
            notes.push(line);
        }
        steps.push(Step {
            id: "pins".to_string(),
            title: "Pin dependency versions".to_string(),
            commands: vec![],
            notes,
        });
    }

    steps.push(Step {
        id: "test".to_string(),
        title: "Run the test suite".to_string(),
        commands: vec![guide.commands.test.clone()],
        notes: vec![],
    });
    steps.push(Step {
        id: "build".to_string(),
        title: "Build release binaries".to_string(),
        commands: vec![guide.commands.build.clone()],
        notes: vec![],
    });

    Ok(steps)
}

pub fn render_detailed(guide: &Guide, platform: PlatformId) -> Result<String, GuideError> {
    let steps = render_steps(guide, platform)?;
    let mut out = String::new();
    out.push_str(&format!("# {} — setup ({})\n", guide.name, platform));
    out.push_str(&format!("{}\n", guide.summary));
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, step.title));
        for cmd in &step.commands {
            out.push_str(&format!("   $ {}\n", cmd));
        }
        for note in &step.notes {
            out.push_str(&format!("   {}\n", note));
        }
    }
    out.push_str(&format!(
        "\nIf any step fails on the mainline branch, open an issue: {}/issues\n",
        guide.repository.url
    ));
    Ok(out)
}

/// The bare command sequence. References the identical test and build
/// commands as the detailed rendering.
pub fn render_quickstart(guide: &Guide, platform: PlatformId) -> Result<Vec<String>, GuideError> {
    let steps = render_steps(guide, platform)?;
    Ok(steps.into_iter().flat_map(|s| s.commands).collect())
}

pub fn find_step(guide: &Guide, platform: PlatformId, id: &str) -> Result<Step, GuideError> {
    render_steps(guide, platform)?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| GuideError::StepNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::builtin_guide;

    #[test]
    fn windows_steps_include_pins_and_unix_steps_do_not() {
        let g = builtin_guide().unwrap();
        let unix: Vec<String> = render_steps(&g, PlatformId::GenericUnix)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        let windows: Vec<String> = render_steps(&g, PlatformId::Windows)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(unix, ["toolchain", "native-deps", "source", "test", "build"]);
        assert_eq!(
            windows,
            ["toolchain", "native-deps", "source", "pins", "test", "build"]
        );
    }

    #[test]
    fn detailed_mentions_each_native_dep_exactly_once() {
        let g = builtin_guide().unwrap();
        for platform in [PlatformId::GenericUnix, PlatformId::Windows] {
            let text = render_detailed(&g, platform).unwrap();
            for dep in &g.native_deps {
                assert_eq!(
                    text.matches(dep.name.as_str()).count(),
                    1,
                    "{} on {}",
                    dep.name,
                    platform
                );
            }
        }
    }

    #[test]
    fn quickstart_and_detailed_share_test_and_build_commands() {
        let g = builtin_guide().unwrap();
        let detailed = render_detailed(&g, PlatformId::GenericUnix).unwrap();
        let quick = render_quickstart(&g, PlatformId::GenericUnix).unwrap();
        assert!(detailed.contains(&g.commands.test));
        assert!(detailed.contains(&g.commands.build));
        assert!(quick.contains(&g.commands.test));
        assert!(quick.contains(&g.commands.build));
    }

    #[test]
    fn clone_honors_the_submodule_flag() {
        let mut g = builtin_guide().unwrap();
        let steps = render_steps(&g, PlatformId::GenericUnix).unwrap();
        let clone = &steps.iter().find(|s| s.id == "source").unwrap().commands[0];
        assert!(clone.starts_with("git clone --recursive "));

        g.repository.submodules = false;
        let steps = render_steps(&g, PlatformId::GenericUnix).unwrap();
        let clone = &steps.iter().find(|s| s.id == "source").unwrap().commands[0];
        assert!(!clone.contains("--recursive"));
    }

    #[test]
    fn unknown_step_is_an_error() {
        let g = builtin_guide().unwrap();
        assert!(matches!(
            find_step(&g, PlatformId::GenericUnix, "pins"),
            Err(GuideError::StepNotFound(_))
        ));
        assert!(find_step(&g, PlatformId::Windows, "pins").is_ok());
    }
}
