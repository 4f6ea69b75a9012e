use crate::clients::traits::{ClassChartsClient, Login};
use crate::interfaces::activity::ActivityPoint;
use crate::interfaces::homework::{Homework, HomeworkOptions};
use crate::interfaces::lessons::LessonsResponse;
use crate::interfaces::pupils::Pupil;
use crate::{ParentClient, StudentClient};
use anyhow::{bail, Context, Result};
use self::config::{Account, Args, Command, Config};
use std::fmt::Write;

/// Command line arguments and the TOML config file
pub mod config;

/// Coloured, timestamped log lines
pub mod log_format;

/// Log in with the configured account and run one command.
pub async fn run(args: Args) -> Result<()> {
    let config = Config::parse(&args.config)?;
    let client_config = config.client_config();

    match config.account {
        Account::Parent { email, password } => {
            let mut client = ParentClient::with_config(email, password, client_config)?;
            client.login().await.context("Parent login failed")?;

            if let Command::Pupils = args.command {
                print!("{}", format_pupils(client.pupils()));
                return Ok(());
            }
            run_command(&mut client, &args.command).await
        }
        Account::Student {
            code,
            date_of_birth,
        } => {
            let mut client = StudentClient::with_config(code, date_of_birth, client_config)?;
            client.login().await.context("Student login failed")?;

            if let Command::Pupils = args.command {
                bail!("Only parent accounts have pupils");
            }
            run_command(&mut client, &args.command).await
        }
    }
}

async fn run_command<C: ClassChartsClient>(client: &mut C, command: &Command) -> Result<()> {
    match command {
        Command::Info => {
            let user = client.get_student_info().await?.data.user;
            println!("{} (id {})", user.name, user.id);
            println!("Announcements: {}", user.announcements_count);
            println!("Messages: {}", user.messages_count);
        }
        Command::Timetable { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let lessons = client
                .get_lessons(date)
                .await
                .with_context(|| format!("Failed to get timetable of {date}"))?;
            print!("{}", format_lessons(&lessons));
        }
        Command::Activity { from, to } => {
            let points = client.get_full_activity(*from, *to).await?;
            print!("{}", format_activity(&points));
            println!("{} activity point(s)", points.len());
        }
        Command::Homework => {
            let homeworks = client.get_homeworks(HomeworkOptions::default()).await?;
            print!("{}", format_homeworks(&homeworks.data));
        }
        Command::Pupils => bail!("Only parent accounts have pupils"),
    }

    Ok(())
}

fn format_lessons(lessons: &LessonsResponse) -> String {
    let mut out = String::new();

    for lesson in &lessons.data {
        let _ = writeln!(out, "Period {}", lesson.period_name);
        let _ = writeln!(out, "  Subject: {}", lesson.subject_name);
        let _ = writeln!(out, "  Lesson: {}", lesson.lesson_name);
        let _ = writeln!(out, "  Teacher: {}", lesson.teacher_name);
        let _ = writeln!(out, "  Room: {}", lesson.room_name);
        if !lesson.note.is_empty() {
            let _ = writeln!(out, "  Note: {}", lesson.note);
        }
        if !lesson.pupil_note.is_empty() {
            let _ = writeln!(out, "  Your note: {}", lesson.pupil_note);
        }
    }

    let meta = &lessons.meta;
    let _ = writeln!(out, "School starts at {}", meta.start_time);
    let _ = writeln!(out, "School ends at {}", meta.end_time);
    let _ = writeln!(out, "{} period(s)", meta.periods.len());
    out
}

fn format_activity(points: &[ActivityPoint]) -> String {
    let mut out = String::new();
    for point in points {
        let _ = write!(out, "{} {:+} {}", point.timestamp, point.score, point.reason);
        if let Some(teacher) = &point.teacher_name {
            let _ = write!(out, " ({teacher})");
        }
        out.push('\n');
    }
    out
}

fn format_homeworks(homeworks: &[Homework]) -> String {
    let mut out = String::new();
    for homework in homeworks {
        let state = match homework.status.state {
            Some(state) => format!("{state:?}"),
            None => "Unmarked".to_string(),
        };
        let _ = writeln!(
            out,
            "{} {}: {} [{state}]",
            homework.due_date, homework.subject, homework.title
        );
    }
    out
}

fn format_pupils(pupils: &[Pupil]) -> String {
    let mut out = String::new();
    for pupil in pupils {
        let _ = writeln!(
            out,
            "{} (id {}) at {}",
            pupil.name(),
            pupil.id(),
            pupil.school_name
        );
    }
    out
}
