use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use superpages::api::{ConfigAction, PageFilter, SuperpagesApi};
use superpages::commands::{PageDraft, PageEdit};
use superpages::config::SuperpagesConfig;
use superpages::error::{Result, SuperpagesError};
use superpages::logging::init_logging;
use superpages::store::fs::FileStore;

mod args;
mod print;
use args::{Cli, Commands};
use print::{print_config, print_history, print_messages, print_page, print_pages};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: SuperpagesApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create {
            title,
            content,
            format,
            parent,
            slug,
            path,
            template,
            css,
            js,
            author,
            message,
        }) => {
            let draft = PageDraft {
                title,
                content,
                author: author.unwrap_or_default(),
                format,
                slug,
                path,
                parent,
                custom_template: template,
                extra_css: css,
                extra_js: js,
            };
            let result = ctx.api.create_page(draft, message.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Edit {
            path,
            title,
            content,
            format,
            slug,
            reslug,
            parent,
            detach,
            template,
            css,
            js,
            author,
            message,
        }) => {
            let edit = PageEdit {
                title,
                content,
                author,
                format,
                slug,
                clear_slug: reslug,
                parent,
                clear_parent: detach,
                custom_template: template,
                extra_css: css,
                extra_js: js,
            };
            let result = ctx.api.edit_page(&path, edit, message.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Retire { path, message }) => handle_status(&mut ctx, &path, false, message),
        Some(Commands::Activate { path, message }) => handle_status(&mut ctx, &path, true, message),
        Some(Commands::List { all, under }) => handle_list(&ctx, all, under),
        Some(Commands::Show { path }) => {
            let result = ctx.api.view_page(&path)?;
            if let Some(page) = result.listed_pages.first() {
                print_page(page, &result.template_names);
            }
            Ok(())
        }
        Some(Commands::History { path, limit }) => {
            let result = ctx.api.history(&path, limit)?;
            if let Some(page) = result.listed_pages.first() {
                print_history(page, &result.snapshots);
            }
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Index) => {
            let result = ctx.api.search_documents()?;
            let json = serde_json::to_string_pretty(&result.documents)?;
            println!("{}", json);
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, false, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let config = SuperpagesConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone());
    let api = SuperpagesApi::new(store, config, data_dir);
    Ok(AppContext { api })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "superpages", "superpages")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SuperpagesError::Config("could not determine a data directory".into()))
}

fn handle_status(ctx: &mut AppContext, path: &str, active: bool, message: Option<String>) -> Result<()> {
    let result = ctx.api.set_active(path, active, message.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, all: bool, under: Option<String>) -> Result<()> {
    let filter = PageFilter {
        include_inactive: all,
        under,
    };
    let result = ctx.api.list_pages(filter)?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config_action(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
