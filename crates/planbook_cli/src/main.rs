//! Interactive CLI entry point.
//!
//! # Responsibility
//! - Drive registration/login, bucket edits and the chat loop against
//!   `planbook_core`.
//! - Keep all business rules out of this crate; it only reads input,
//!   calls services and prints answers.

use planbook_core::{
    default_log_level, init_logging, AccountService, Answer, AskError, AssistantService,
    AuthOutcome, BucketService, Deadline, GraphBucketRepository, GraphStore, GraphUserRepository,
    Priority, RegisterRequest, RepoError,
};
use log::info;
use std::io::{self, BufRead, Write};

const NOT_UNDERSTOOD_REPLY: &str = "Sorry I could not understand, could you please repeat";
const NO_RECORD_REPLY: &str = "No record available";

fn main() {
    if let Err(message) = init_logging(default_log_level(), log_dir()) {
        eprintln!("warning: logging disabled: {message}");
    }

    let db_path = std::env::var("PLANBOOK_DB").unwrap_or_else(|_| "planbook.db".to_string());
    let mut store = match GraphStore::open(&db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot open database `{db_path}`: {err}");
            std::process::exit(1);
        }
    };

    info!("event=cli_start module=cli core_version={}", planbook_core::core_version());

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Planbook - your personal task assistant");
    let user_id = match start_session(&mut input, &mut store) {
        Some(user_id) => user_id,
        None => return,
    };

    println!("--------------------Continue where you left-----------------");
    loop {
        println!(
            "Queries \n1. To edit a shopping list \n2. To edit work deadlines \n3. To edit vacation plans \n4. To chat \n5. To exit"
        );
        match read_i64(&mut input, "Enter choice: ") {
            Some(1) => edit_shopping(&mut input, &mut store, &user_id),
            Some(2) => edit_work(&mut input, &mut store, &user_id),
            Some(3) => edit_travel(&mut input, &mut store, &user_id),
            Some(4) => chat(&mut input, &store, &user_id),
            _ => break,
        }
    }
}

fn log_dir() -> String {
    std::env::var("PLANBOOK_LOG_DIR").unwrap_or_else(|_| "logs".to_string())
}

/// Registers or logs in; returns the authenticated user id, or None on EOF.
fn start_session(input: &mut impl BufRead, store: &mut GraphStore) -> Option<String> {
    loop {
        let choice = read_i64(input, "Enter \n1. To register \n2. To log in\n")?;
        match choice {
            1 => {
                println!("---------------------------Register-------------------------");
                if let Some(user_id) = register(input, store) {
                    return Some(user_id);
                }
            }
            2 => {
                println!("----------------------------Log in--------------------------");
                if let Some(user_id) = login(input, store) {
                    return Some(user_id);
                }
            }
            _ => println!("Please enter 1 or 2"),
        }
    }
}

fn register(input: &mut impl BufRead, store: &mut GraphStore) -> Option<String> {
    let name = read_line(input, "Enter your name: ")?;
    let age = read_i64(input, "Enter your age: ")?;
    let user_id = read_line(input, "Enter your e-mail id: ")?;
    let password = read_line(input, "Enter password: ")?;

    let request = RegisterRequest {
        name,
        age,
        user_id: user_id.clone(),
        password,
    };
    let mut accounts = AccountService::new(GraphUserRepository::new(store));
    match accounts.register(&request) {
        Ok(()) => Some(user_id),
        Err(RepoError::DuplicateUser(id)) => {
            println!("An account already exists for {id}, please log in");
            None
        }
        Err(err) => {
            println!("Could not register: {err}");
            None
        }
    }
}

fn login(input: &mut impl BufRead, store: &mut GraphStore) -> Option<String> {
    let user_id = read_line(input, "Enter your e-mail id: ")?;
    let mut password = read_line(input, "Enter password: ")?;

    loop {
        let outcome = {
            let accounts = AccountService::new(GraphUserRepository::new(store));
            accounts.login(&user_id, &password)
        };
        match outcome {
            Ok(AuthOutcome::Ok(profile)) => {
                println!("Welcome back {}", profile.name);
                return Some(user_id);
            }
            Ok(AuthOutcome::WrongPassword) => {
                println!("Incorrect password");
                password = read_line(input, "Try again, Enter password: ")?;
            }
            Ok(AuthOutcome::NotFound) => {
                println!("E-mail id does not exist please register: ");
                return register(input, store);
            }
            Err(err) => {
                println!("Could not log in: {err}");
                return None;
            }
        }
    }
}

fn edit_shopping(input: &mut impl BufRead, store: &mut GraphStore, user_id: &str) {
    let Some(prompt) = read_line(input, "What would you like to edit in the shopping list? ")
    else {
        return;
    };
    let prompt = prompt.to_lowercase();
    let mut buckets = BucketService::new(GraphBucketRepository::new(store));

    if prompt.contains("add") || prompt.contains("insert") {
        let Some(item) = read_line(input, "What item? ") else { return };
        let Some(quantity) = read_i64(input, "Quantity of the item? ") else { return };
        let Some(unit) = read_line(input, "Units of measurement? ") else { return };
        report(buckets.add_item(user_id, &item, quantity, &unit));
    } else if prompt.contains("delete") || prompt.contains("remove") {
        let Some(item) = read_line(input, "What item: ") else { return };
        report(buckets.remove_item(user_id, &item));
    } else {
        println!("{NOT_UNDERSTOOD_REPLY}");
    }
}

fn edit_work(input: &mut impl BufRead, store: &mut GraphStore, user_id: &str) {
    let Some(prompt) = read_line(input, "What would you like to edit in the works list? ") else {
        return;
    };
    let prompt = prompt.to_lowercase();
    let mut buckets = BucketService::new(GraphBucketRepository::new(store));

    if prompt.contains("add") || prompt.contains("insert") {
        let Some(title) = read_line(input, "What is the work title? ") else { return };
        let Some(deadline) = read_deadline(input) else { return };
        let Some(priority) = read_priority(input) else { return };
        report(buckets.add_work(user_id, &title, priority, deadline));
    } else if prompt.contains("delete") || prompt.contains("remove") {
        let Some(title) = read_line(input, "What is the work title? ") else { return };
        report(buckets.remove_work(user_id, &title));
    } else {
        println!("{NOT_UNDERSTOOD_REPLY}");
    }
}

fn edit_travel(input: &mut impl BufRead, store: &mut GraphStore, user_id: &str) {
    let Some(prompt) =
        read_line(input, "What would you like to edit in the travelling places list? ")
    else {
        return;
    };
    let prompt = prompt.to_lowercase();
    let mut buckets = BucketService::new(GraphBucketRepository::new(store));

    if prompt.contains("add") || prompt.contains("insert") {
        let Some(city) = read_line(input, "What is the city name? ") else { return };
        let Some(country) = read_line(input, "What is the country? ") else { return };
        let Some(cost) = read_f64(input, "What is the estimated cost of travel? ") else {
            return;
        };
        report(buckets.add_place(user_id, &city, &country, cost));
    } else if prompt.contains("delete") || prompt.contains("remove") {
        let Some(city) = read_line(input, "What is the city name? ") else { return };
        report(buckets.remove_place(user_id, &city));
    } else {
        println!("{NOT_UNDERSTOOD_REPLY}");
    }
}

fn chat(input: &mut impl BufRead, store: &GraphStore, user_id: &str) {
    println!("Enter exit to stop the chat");
    let assistant = AssistantService::new(store);
    loop {
        let Some(prompt) = read_line(input, "What do you want to know: ") else { return };
        if prompt.eq_ignore_ascii_case("exit") {
            return;
        }
        match assistant.ask(user_id, &prompt) {
            Ok(Answer::Lines(lines)) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Ok(Answer::NoRecords) => println!("{NO_RECORD_REPLY}"),
            Err(AskError::NotUnderstood) => println!("{NOT_UNDERSTOOD_REPLY}"),
            Err(err) => println!("Could not answer: {err}"),
        }
    }
}

fn report(result: planbook_core::RepoResult<()>) {
    match result {
        Ok(()) => println!("Done"),
        Err(err) => println!("Could not apply the change: {err}"),
    }
}

fn read_deadline(input: &mut impl BufRead) -> Option<Deadline> {
    loop {
        let text = read_line(input, "What is the deadline of the work (DD-MM-YYYY)? ")?;
        match Deadline::parse(&text) {
            Ok(deadline) => return Some(deadline),
            Err(err) => println!("{err}"),
        }
    }
}

fn read_priority(input: &mut impl BufRead) -> Option<Priority> {
    loop {
        let text = read_line(input, "Priority of the work as HIGH, MEDIUM, LOW? ")?;
        match Priority::parse(&text) {
            Ok(priority) => return Some(priority),
            Err(err) => println!("{err}"),
        }
    }
}

/// Reads one trimmed line; None means stdin was closed.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Option<String> {
    loop {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut buffer = String::new();
        match input.read_line(&mut buffer) {
            Ok(0) => return None,
            Ok(_) => {
                let trimmed = buffer.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Err(_) => return None,
        }
    }
}

fn read_i64(input: &mut impl BufRead, prompt: &str) -> Option<i64> {
    loop {
        let text = read_line(input, prompt)?;
        match text.parse::<i64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a whole number"),
        }
    }
}

fn read_f64(input: &mut impl BufRead, prompt: &str) -> Option<f64> {
    loop {
        let text = read_line(input, prompt)?;
        match text.parse::<f64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number"),
        }
    }
}
