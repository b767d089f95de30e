mod ids;
mod week;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use hobbyweek_core::model::hobby::category_display;
use hobbyweek_core::{
    parse_time_of_day, FileRepository, ScheduleRepository, ScheduleService, Settings, SlotChanges,
    WeekdaySymbol, WeeklyAgendaUseCase,
};
use mockable::{DefaultClock, DefaultEnv};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::ids::{resolve_id, short_id};

#[derive(Parser)]
#[command(name = "hobbyweek")]
#[command(about = "Weekly hobby schedules without overlaps", long_about = None)]
struct Cli {
    /// Directory holding schedule.json (default: $HOBBYWEEK_DIR or ~/.hobbyweek)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// IANA timezone for projecting slots (default: $HOBBYWEEK_TZ, $TZ or UTC)
    #[arg(long, global = true)]
    tz: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage people
    #[command(subcommand)]
    Partner(PartnerCommand),
    /// Manage hobby categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage hobbies
    #[command(subcommand)]
    Hobby(HobbyCommand),
    /// Register a hobby for a person
    Assign { partner: String, hobby: String },
    /// Remove a hobby registration and its slots
    Unassign { assignment: String },
    /// Manage weekly time slots
    #[command(subcommand)]
    Slot(SlotCommand),
    /// Show the current week grouped by day
    Week {
        #[arg(long)]
        partner: Option<String>,
    },
    /// Recompute every slot for the current week
    Refresh,
}

#[derive(Subcommand)]
enum PartnerCommand {
    Add { name: String },
    List,
    Rm { partner: String },
}

#[derive(Subcommand)]
enum CategoryCommand {
    Add { name: String },
    List,
    Rm { category: String },
}

#[derive(Subcommand)]
enum HobbyCommand {
    Add {
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    List,
    Rm { hobby: String },
}

#[derive(Subcommand)]
enum SlotCommand {
    /// Add a slot, e.g. `slot add 3f2a mon 9:30 17:15`
    Add {
        assignment: String,
        day: String,
        start: String,
        end: String,
    },
    Edit {
        slot: String,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Rm { slot: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.data_dir, cli.tz)?;
    let service = open_service(&settings)?;

    match cli.command {
        Commands::Partner(cmd) => run_partner(&service, cmd)?,
        Commands::Category(cmd) => run_category(&service, cmd)?,
        Commands::Hobby(cmd) => run_hobby(&service, cmd)?,
        Commands::Assign { partner, hobby } => {
            let partner_id = resolve_id(&partner, service.list_partners()?.iter().map(|p| p.id))?;
            let hobby_id = resolve_id(&hobby, service.list_hobbies()?.iter().map(|h| h.id))?;
            let assignment = service.assign_hobby(&partner_id, &hobby_id)?;
            println!("Hobby assigned (ID: {})", assignment.id);
        }
        Commands::Unassign { assignment } => {
            let id = resolve_id(&assignment, all_assignment_ids(&service)?)?;
            service.remove_assignment(&id)?;
            println!("Assignment removed.");
        }
        Commands::Slot(cmd) => run_slot(&service, cmd)?,
        Commands::Week { partner } => {
            service.refresh_windows()?;
            let partner_id = match partner {
                Some(p) => Some(resolve_id(&p, service.list_partners()?.iter().map(|p| p.id))?),
                None => None,
            };
            let agenda = WeeklyAgendaUseCase::new(service.repository(), service.timezone())
                .build(partner_id.as_ref())?;
            week::show_week(&agenda, service.timezone());
        }
        Commands::Refresh => {
            let changed = service.refresh_windows()?;
            println!("{} slot(s) moved to the current week.", changed);
        }
    }
    Ok(())
}

fn load_settings(data_dir: Option<PathBuf>, tz: Option<String>) -> Result<Settings> {
    Settings::resolve(&DefaultEnv::new(), data_dir, tz)
}

fn open_service(settings: &Settings) -> Result<ScheduleService<FileRepository>> {
    let repo = FileRepository::new(&settings.data_dir)?;
    Ok(ScheduleService::with_timezone_name(
        repo,
        Arc::new(DefaultClock),
        &settings.timezone,
    ))
}

fn run_partner(service: &ScheduleService<FileRepository>, cmd: PartnerCommand) -> Result<()> {
    match cmd {
        PartnerCommand::Add { name } => {
            let partner = service.add_partner(&name)?;
            println!("Partner added: {} [{}] (ID: {})", partner.name, partner.short_name, partner.id);
        }
        PartnerCommand::List => {
            let partners = service.list_partners()?;
            if partners.is_empty() {
                println!("No partners found.");
                return Ok(());
            }
            println!("{:<10} {:<24} {}", "ID", "Name", "Hobbies");
            println!("{:-<10} {:-<24} {:-<20}", "", "", "");
            for partner in partners {
                println!(
                    "{:<10} {:<24} {}",
                    short_id(&partner.id),
                    partner.name,
                    service.hobbies_summary(&partner.id)?
                );
                for assignment in service.list_assignments(&partner.id)? {
                    println!(
                        "{:<10}   - {} ({})",
                        "",
                        service.assignment_summary(&assignment.id)?,
                        short_id(&assignment.id)
                    );
                }
            }
        }
        PartnerCommand::Rm { partner } => {
            let id = resolve_id(&partner, service.list_partners()?.iter().map(|p| p.id))?;
            service.remove_partner(&id)?;
            println!("Partner removed.");
        }
    }
    Ok(())
}

fn run_category(service: &ScheduleService<FileRepository>, cmd: CategoryCommand) -> Result<()> {
    match cmd {
        CategoryCommand::Add { name } => {
            let category = service.add_category(&name)?;
            println!("Category added: {} (ID: {})", category.name, category.id);
        }
        CategoryCommand::List => {
            let categories = service.list_categories()?;
            if categories.is_empty() {
                println!("No categories found.");
            }
            for category in categories {
                println!("{:<10} {}", short_id(&category.id), category.name);
            }
        }
        CategoryCommand::Rm { category } => {
            let id = resolve_id(&category, service.list_categories()?.iter().map(|c| c.id))?;
            service.remove_category(&id)?;
            println!("Category removed.");
        }
    }
    Ok(())
}

fn run_hobby(service: &ScheduleService<FileRepository>, cmd: HobbyCommand) -> Result<()> {
    match cmd {
        HobbyCommand::Add {
            name,
            category,
            description,
        } => {
            let category_id = match category {
                Some(c) => Some(resolve_id(&c, service.list_categories()?.iter().map(|c| c.id))?),
                None => None,
            };
            let hobby = service.add_hobby(&name, category_id, description)?;
            println!("Hobby added: {} (ID: {})", hobby.name, hobby.id);
        }
        HobbyCommand::List => {
            let hobbies = service.list_hobbies()?;
            if hobbies.is_empty() {
                println!("No hobbies found.");
                return Ok(());
            }
            let categories = service.list_categories()?;
            println!("{:<10} {:<20} {:<16} {}", "ID", "Name", "Category", "Description");
            println!("{:-<10} {:-<20} {:-<16} {:-<20}", "", "", "", "");
            for hobby in hobbies {
                let category = hobby
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id));
                println!(
                    "{:<10} {:<20} {:<16} {}",
                    short_id(&hobby.id),
                    hobby.name,
                    category_display(category),
                    hobby.description_display()
                );
            }
        }
        HobbyCommand::Rm { hobby } => {
            let id = resolve_id(&hobby, service.list_hobbies()?.iter().map(|h| h.id))?;
            service.remove_hobby(&id)?;
            println!("Hobby removed.");
        }
    }
    Ok(())
}

fn run_slot(service: &ScheduleService<FileRepository>, cmd: SlotCommand) -> Result<()> {
    match cmd {
        SlotCommand::Add {
            assignment,
            day,
            start,
            end,
        } => {
            let assignment_id = resolve_id(&assignment, all_assignment_ids(service)?)?;
            let slot = service.add_slot(
                &assignment_id,
                day.parse::<WeekdaySymbol>()?,
                parse_time_of_day(&start)?,
                parse_time_of_day(&end)?,
            )?;
            println!("Slot added: {} {} (ID: {})", slot.name, slot.label(), slot.id);
        }
        SlotCommand::Edit {
            slot,
            day,
            start,
            end,
        } => {
            let slot_id = resolve_id(&slot, all_slot_ids(service)?)?;
            let changes = SlotChanges {
                day: day.map(|d| d.parse::<WeekdaySymbol>()).transpose()?,
                time_start: start.map(|s| parse_time_of_day(&s)).transpose()?,
                time_end: end.map(|e| parse_time_of_day(&e)).transpose()?,
            };
            if changes == SlotChanges::default() {
                return Err(anyhow!("Nothing to change: pass --day, --start or --end"));
            }
            let slot = service.update_slot(&slot_id, changes)?;
            println!("Slot updated: {} {}", slot.name, slot.label());
        }
        SlotCommand::Rm { slot } => {
            let slot_id = resolve_id(&slot, all_slot_ids(service)?)?;
            service.remove_slot(&slot_id)?;
            println!("Slot removed.");
        }
    }
    Ok(())
}

fn all_assignment_ids(service: &ScheduleService<FileRepository>) -> Result<Vec<Uuid>> {
    Ok(service.repository().list_assignments()?.into_iter().map(|a| a.id).collect())
}

fn all_slot_ids(service: &ScheduleService<FileRepository>) -> Result<Vec<Uuid>> {
    Ok(service.repository().list_slots()?.into_iter().map(|s| s.id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use hobbyweek_core::ScheduleError;

    #[test]
    fn test_load_settings_from_process_env() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(
            Some(dir.path().to_path_buf()),
            Some("America/Sao_Paulo".to_string()),
        )
        .unwrap();
        assert_eq!(settings.data_dir, dir.path());
        assert_eq!(settings.timezone, "America/Sao_Paulo");
    }

    #[test]
    fn test_open_service_runs_tuesday_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(Some(dir.path().to_path_buf()), Some("UTC".to_string())).unwrap();
        let service = open_service(&settings).unwrap();
        assert_eq!(service.timezone(), Tz::UTC);

        let partner = service.add_partner("Ada Lovelace").unwrap();
        let hobby = service.add_hobby("Chess", None, None).unwrap();
        let assignment = service.assign_hobby(&partner.id, &hobby.id).unwrap();

        let tue = WeekdaySymbol::Tue;
        assert!(service.add_slot(&assignment.id, tue, 9.0, 10.0).is_ok());
        assert!(service.add_slot(&assignment.id, tue, 10.0, 11.0).is_ok());
        assert!(matches!(
            service.add_slot(&assignment.id, tue, 9.5, 10.5),
            Err(ScheduleError::Overlap(_))
        ));
        assert!(service
            .add_slot(&assignment.id, WeekdaySymbol::Wed, 9.5, 10.5)
            .is_ok());

        // a second process sees the same store
        let reopened = open_service(&settings).unwrap();
        assert_eq!(reopened.partner_schedule(&partner.id).unwrap().len(), 3);
    }
}
