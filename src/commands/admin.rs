use crate::*;

fn platform_str(arg: PlatformArg) -> String {
    match arg {
        PlatformArg::Auto => host_platform().to_string(),
        PlatformArg::GenericUnix => "generic-unix".to_string(),
        PlatformArg::Windows => "windows".to_string(),
    }
}

pub fn handle_author_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Author { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        AuthorCommands::Init {
            guide_dir,
            name,
            repo,
            summary,
        } => {
            services::authoring::guide_init(guide_dir, name, repo, summary)?;
            print_one(cli.json, "created", |_| {
                format!("guide {} scaffolded in {}", name, guide_dir)
            })?;
        }
        AuthorCommands::Dep { command } => match command {
            DepCommands::Add {
                name,
                guide_dir,
                purpose,
                probe,
            } => {
                services::authoring::dep_add(guide_dir, name, purpose.as_deref(), probe.as_deref())?;
                print_one(cli.json, "added", |_| {
                    format!("native dependency {} added", name)
                })?;
            }
            DepCommands::Remove { name, guide_dir } => {
                services::authoring::dep_remove(guide_dir, name)?;
                print_one(cli.json, "removed", |_| {
                    format!("native dependency {} removed", name)
                })?;
            }
        },
        AuthorCommands::Pin { command } => match command {
            PinCommands::Add {
                dependency,
                pin,
                guide_dir,
                platform,
                file,
                reason,
            } => {
                services::authoring::pin_add(
                    guide_dir,
                    &platform_str(*platform),
                    dependency,
                    pin,
                    file,
                    reason.as_deref(),
                )?;
                print_one(cli.json, "added", |_| {
                    format!("pin {} = {} added", dependency, pin)
                })?;
            }
            PinCommands::Remove {
                dependency,
                guide_dir,
                platform,
            } => {
                services::authoring::pin_remove(guide_dir, &platform_str(*platform), dependency)?;
                print_one(cli.json, "removed", |_| format!("pin {} removed", dependency))?;
            }
        },
    }

    Ok(true)
}
