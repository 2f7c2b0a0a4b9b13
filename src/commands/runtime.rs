use crate::*;

pub fn handle_runtime_commands(
    cli: &Cli,
    config: &ConfigFile,
    state: &mut State,
    guide: &guide::Guide,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Guide { platform } => {
            let p = resolve_platform(*platform, config);
            let steps = render_steps(guide, p)?;
            let text = render_detailed(guide, p)?;
            let render = GuideRender {
                guide: guide.name.clone(),
                platform: p.to_string(),
                steps,
                text: text.clone(),
            };
            print_render(cli.json, render, &text)?;
        }
        Commands::Quickstart { platform } => {
            let p = resolve_platform(*platform, config);
            let commands = render_quickstart(guide, p)?;
            let render = QuickstartRender {
                guide: guide.name.clone(),
                platform: p.to_string(),
                commands: commands.clone(),
            };
            print_render(cli.json, render, &commands.join("\n"))?;
        }
        Commands::Steps { platform } => {
            let p = resolve_platform(*platform, config);
            let steps = render_steps(guide, p)?;
            print_out(cli.json, &steps, |s| format!("{}\t{}", s.id, s.title))?;
        }
        Commands::Show { step, platform } => {
            let p = resolve_platform(*platform, config);
            let s = find_step(guide, p, step)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok: true, data: s })?
                );
            } else {
                println!("{}", s.title);
                for cmd in &s.commands {
                    println!("$ {}", cmd);
                }
                for note in &s.notes {
                    println!("{}", note);
                }
            }
        }
        Commands::Deps => {
            if cli.json {
                let report = DepsReport {
                    guide: guide.name.clone(),
                    native_deps: guide.native_deps.clone(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                for dep in &guide.native_deps {
                    println!(
                        "{}\t{}\t{}",
                        dep.name,
                        dep.purpose.as_deref().unwrap_or("-"),
                        dep.probe.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        Commands::Toolchain => {
            let report = ToolchainReport {
                guide: guide.name.clone(),
                toolchain: guide.toolchain.clone(),
            };
            print_one(cli.json, report, |r| {
                format!(
                    "channel={} nightly_compatible={} inspect={:?} update={:?}",
                    r.toolchain.channel,
                    r.toolchain.nightly_compatible,
                    r.toolchain.inspect,
                    r.toolchain.update
                )
            })?;
        }
        Commands::Doctor { platform } => {
            let p = resolve_platform(*platform, config);
            let report = run_doctor(guide, p)?;
            audit(
                "doctor",
                serde_json::json!({"guide": guide.name, "platform": p.to_string(), "overall": report.overall}),
            );
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!("overall: {}", report.overall);
                for c in &report.checks {
                    println!("{}\t{}", c.name, c.status);
                }
                if report.overall != "ok" {
                    println!(
                        "If tools are missing on a fresh machine, open an issue: {}/issues",
                        guide.repository.url
                    );
                }
            }
        }
        Commands::Validate { platform } => {
            let p = platform.map(|arg| resolve_platform(arg, config));
            let report = check_guide(guide, p);
            audit(
                "validate",
                serde_json::json!({"guide": guide.name, "overall": report.overall}),
            );
            let ok = report.overall == "ok";
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok, data: report })?
                );
            } else {
                println!("guide consistency: {}", report.overall);
                for c in &report.checks {
                    println!(
                        "{}\t{}\t{}",
                        c.platform.as_deref().unwrap_or("-"),
                        c.name,
                        c.status
                    );
                }
                if !ok {
                    println!(
                        "If the guide is inconsistent on the mainline branch, open an issue: {}/issues",
                        guide.repository.url
                    );
                }
            }
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Progress { platform } => {
            let p = resolve_platform(*platform, config);
            let steps = render_steps(guide, p)?;
            let completed = completed_steps(state, &guide.name, p);
            let mut done = Vec::new();
            let mut pending = Vec::new();
            for s in &steps {
                if completed.contains(&s.id) {
                    done.push(s.id.clone());
                } else {
                    pending.push(s.id.clone());
                }
            }
            let report = ProgressReport {
                guide: guide.name.clone(),
                platform: p.to_string(),
                done,
                pending,
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!(
                    "{} ({}): {}/{} steps done",
                    report.guide,
                    report.platform,
                    report.done.len(),
                    report.done.len() + report.pending.len()
                );
                for id in &report.done {
                    println!("done\t{}", id);
                }
                for id in &report.pending {
                    println!("pending\t{}", id);
                }
            }
        }
        Commands::MarkDone { step, platform } => {
            let p = resolve_platform(*platform, config);
            // Reject ids the selected platform does not render.
            let s = find_step(guide, p, step)?;
            let entry = StepRecord {
                guide: guide.name.clone(),
                platform: p,
                step: s.id.clone(),
                completed_at: chrono::Utc::now().to_rfc3339(),
            };
            upsert_progress(state, entry.clone());
            audit(
                "mark_done",
                serde_json::json!({"guide": entry.guide, "platform": p.to_string(), "step": entry.step}),
            );
            save_state(state)?;
            print_one(cli.json, entry, |e| {
                format!("marked {} done for {} ({})", e.step, e.guide, e.platform)
            })?;
        }
        Commands::Reset => {
            let removed = clear_progress(state, &guide.name);
            audit(
                "reset",
                serde_json::json!({"guide": guide.name, "removed": removed}),
            );
            save_state(state)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: removed
                    })?
                );
            } else {
                println!("removed {} progress records", removed);
            }
        }
        Commands::List => {
            let mut sources = state.sources.clone();
            dedupe_sources(&mut sources);
            let listed = guides_across(&sources, config);
            print_out(cli.json, &listed, |g| {
                format!("{}\t{}\t{}", g.name, g.source, g.summary)
            })?;
        }
        Commands::Source { command } => match command {
            SourceCommands::Add { source } => {
                let g = checked_load_guide(source, config)?;
                let sr = SourceRef {
                    name: g.name,
                    source: source.clone(),
                };
                if !state.sources.iter().any(|x| x.source == sr.source) {
                    state.sources.push(sr.clone());
                    save_state(state)?;
                }
                audit("source_add", serde_json::json!({"source": sr.source}));
                print_one(cli.json, sr, |s| format!("added {}", s.name))?;
            }
            SourceCommands::List => {
                print_out(cli.json, &state.sources, |s| {
                    format!("{}\t{}", s.name, s.source)
                })?;
            }
            SourceCommands::Update => {
                let mut checked = 0usize;
                for s in &state.sources {
                    guide::refresh_guide(&s.source)?;
                    let _ = checked_load_guide(&s.source, config)?;
                    checked += 1;
                }
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&JsonOut {
                            ok: true,
                            data: checked
                        })?
                    );
                } else {
                    println!("updated {} sources", checked);
                }
            }
        },
        Commands::Author { .. } => {
            unreachable!("handled before guide loading")
        }
    }

    Ok(())
}
