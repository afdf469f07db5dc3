use clap::Parser;
use form_builder::cli::commands::{
    cmd_add, cmd_list, cmd_move, cmd_new, cmd_publish, cmd_remove, cmd_render, cmd_save, cmd_set,
    cmd_show, cmd_submissions, cmd_submit, open_backend,
};
use form_builder::cli::config::{Cli, Commands, load_config, resolve_settings};
use form_builder::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_deref());
    // Resolve settings: CLI > config > defaults
    let settings = resolve_settings(&cli, &config);
    let mut backend = open_backend(&settings)?;
    let backend = backend.as_mut();

    let output = match cli.command {
        Commands::New { name, description } => cmd_new(backend, &name, &description)?,
        Commands::List => cmd_list(backend)?,
        Commands::Show { form_id } => cmd_show(backend, form_id, &settings)?,
        Commands::Add {
            form_id,
            element_type,
            above,
            below,
        } => cmd_add(
            backend,
            form_id,
            element_type,
            above.as_deref(),
            below.as_deref(),
            &settings,
        )?,
        Commands::Move {
            form_id,
            element_id,
            above,
            below,
        } => cmd_move(
            backend,
            form_id,
            &element_id,
            above.as_deref(),
            below.as_deref(),
            &settings,
        )?,
        Commands::Remove { form_id, element_id } => cmd_remove(backend, form_id, &element_id, &settings)?,
        Commands::Set {
            form_id,
            element_id,
            props,
        } => cmd_set(backend, form_id, &element_id, &props, &settings)?,
        Commands::Save { form_id, from } => cmd_save(backend, form_id, &from, &settings)?,
        Commands::Publish { form_id } => cmd_publish(backend, form_id, &settings)?,
        Commands::Render {
            form_id,
            view,
            output,
        } => cmd_render(backend, form_id, view, output.as_deref(), &settings)?,
        Commands::Submit { share_url, fields } => cmd_submit(backend, &share_url, &fields)?,
        Commands::Submissions { form_id } => cmd_submissions(backend, form_id)?,
    };

    println!("{}", output);
    Ok(())
}
