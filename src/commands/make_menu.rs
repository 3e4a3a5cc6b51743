// nativecli - commands/make_menu.rs
//
// `nativecli make:menu`: prompt for whatever the flags leave open, then hand
// off to `app::make_menu`.

use super::Context;
use crate::app::make_menu::{self, ListenerOutcome, MenuApplied, MenuOutcome, MenuRequest};
use crate::core::menu::{self, MenuItem, MenuType};
use crate::util::error::{ProjectError, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

#[derive(Args, Debug)]
pub struct MakeMenuArgs {
    /// The menu name / label
    name: Option<String>,

    /// Menu type (app, file, edit, view, window, custom)
    #[arg(short = 't', long = "type")]
    menu_type: Option<String>,

    /// Generate for a menu bar application
    #[arg(short = 'm', long)]
    menubar: bool,

    /// Skip generating the event listener
    #[arg(long = "no-listener")]
    no_listener: bool,
}

pub fn run(ctx: &Context, args: MakeMenuArgs) -> Result<()> {
    make_menu::check_preconditions(&ctx.project_dir)?;

    println!("{}", "NativePHP Menu Generator".bold());
    println!();

    let name = match args.name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("Menu name (e.g., \"File\", \"Edit\", \"My Menu\")")
            .validate_with(|answer: &String| -> std::result::Result<(), &'static str> {
                if answer.trim().is_empty() {
                    Err("Menu name cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let menu_type = match args.menu_type {
        Some(value) => value
            .parse::<MenuType>()
            .map_err(|_| ProjectError::InvalidMenuType { value })?,
        None => prompt_menu_type()?,
    };

    let mut request = MenuRequest::new(&name, menu_type);
    request.menu_bar = args.menubar;
    request.with_listener = !args.no_listener;

    if menu_type == MenuType::Custom {
        println!();
        println!("{}", "Building Custom Menu".bold());
        request.items = build_custom_menu()?;
        if request.items.is_empty() {
            println!("{}", "No menu items added. Menu will be empty.".yellow());
        }
    }

    let provider = make_menu::provider_path(&ctx.project_dir);
    println!("Creating backup of {}...", provider.display());

    let applied = match make_menu::apply_menu(&ctx.project_dir, &request)? {
        MenuOutcome::Applied(applied) => applied,
        MenuOutcome::Duplicate { .. } => {
            let proceed = Confirm::new()
                .with_prompt(format!(
                    "A menu with label '{name}' already exists. Do you want to add it anyway?"
                ))
                .default(false)
                .interact()?;
            if !proceed {
                println!("{}", "Menu generation cancelled.".green());
                return Ok(());
            }
            request.allow_duplicate = true;
            match make_menu::apply_menu(&ctx.project_dir, &request)? {
                MenuOutcome::Applied(applied) => applied,
                MenuOutcome::Duplicate { .. } => return Ok(()),
            }
        }
    };

    println!(
        "{}",
        format!("Menu code added to {}", applied.provider.display()).green()
    );

    report_listener(ctx, &name, &applied)?;
    print_next_steps(args.no_listener);
    Ok(())
}

fn prompt_menu_type() -> Result<MenuType> {
    let types = MenuType::all();
    let choices: Vec<String> = types
        .iter()
        .map(|t| format!("{} - {}", t.tag(), t.description()))
        .collect();

    let index = Select::new()
        .with_prompt("Select menu type")
        .items(&choices)
        .default(0)
        .interact()?;
    Ok(types[index])
}

fn build_custom_menu() -> Result<Vec<MenuItem>> {
    let mut items = Vec::new();

    loop {
        let choice = Select::new()
            .with_prompt("Add menu item")
            .items(&["Item", "Separator", "Done"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let label = required_input("Item label", "Label cannot be empty")?;
                let action = required_input(
                    "Item action ID (e.g., \"file.open\")",
                    "Action cannot be empty",
                )?;
                let shortcut: String = Input::new()
                    .with_prompt("Keyboard shortcut (optional, e.g., \"CmdOrCtrl+N\")")
                    .allow_empty(true)
                    .interact_text()?;

                items.push(if shortcut.trim().is_empty() {
                    MenuItem::item(&label, &action)
                } else {
                    MenuItem::with_shortcut(&label, &action, shortcut.trim())
                });
                println!("{}", format!("Added: {label}").green());
            }
            1 => {
                items.push(MenuItem::Separator);
                println!("{}", "Separator added".green());
            }
            _ => break,
        }
    }

    Ok(items)
}

fn required_input(prompt: &str, empty_message: &'static str) -> Result<String> {
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(move |answer: &String| -> std::result::Result<(), &'static str> {
            if answer.trim().is_empty() {
                Err(empty_message)
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(answer)
}

fn report_listener(ctx: &Context, name: &str, applied: &MenuApplied) -> Result<()> {
    let outcome = match &applied.listener {
        ListenerOutcome::AlreadyExists { class_name, .. } => {
            let overwrite = Confirm::new()
                .with_prompt(format!("Listener {class_name} already exists. Overwrite?"))
                .default(false)
                .interact()?;
            if !overwrite {
                println!("{}", "Listener generation skipped.".green());
                return Ok(());
            }
            make_menu::write_listener(&ctx.project_dir, name, true)?
        }
        other => other.clone(),
    };

    if let ListenerOutcome::Created { class_name, .. } = outcome {
        println!(
            "{}",
            format!("Event listener created: app/Listeners/{class_name}.php").green()
        );
        println!("Remember to register the listener in EventServiceProvider:");
        println!("{}", menu::listener_registration(&class_name));
    }
    Ok(())
}

fn print_next_steps(skip_listener: bool) {
    println!();
    println!("{}", "Next Steps".bold());
    println!(" * Review the generated menu code in NativeAppServiceProvider::boot()");
    if skip_listener {
        println!(" * Create event listeners for menu actions if needed");
    } else {
        println!(" * Register the event listener in app/Providers/EventServiceProvider.php");
    }
    println!(" * Implement the action handlers in your listener class");
    println!(" * Test the menu in your application: php artisan native:run");
    println!();
    println!("A backup of your NativeAppServiceProvider has been created.");
    println!("You can restore it if needed: NativeAppServiceProvider.php.backup");
}
