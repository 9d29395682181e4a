use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenv::dotenv;
use exitfailure::ExitFailure;
use failure::ResultExt;
use structopt::StructOpt;
use trivia::display::{format_categories, question_line};
use trivia::models::{CategoryMap, NewQuestion, Question};
use trivia::paginate::paginate;
use trivia::{actions, quiz};

#[derive(StructOpt)]
enum Command {
    /// Print every category
    Categories,
    AddCategory {
        label: String,
    },
    /// Print one page of questions
    Questions {
        #[structopt(short, long, default_value = "1")]
        page: i64,
        #[structopt(short, long)]
        category: Option<i32>,
    },
    Search {
        term: String,
        #[structopt(short, long, default_value = "1")]
        page: i64,
    },
    AddQuestion {
        #[structopt(long)]
        question: String,
        #[structopt(long)]
        answer: String,
        #[structopt(long)]
        category: i32,
        #[structopt(long)]
        difficulty: i32,
    },
    Delete {
        id: i32,
    },
    /// Draw one quiz question, skipping the given ids
    Quiz {
        #[structopt(short, long)]
        category: Option<i32>,
        #[structopt(short, long)]
        previous: Vec<i32>,
    },
}

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, env = "DATABASE_URL")]
    database_url: String,
    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), ExitFailure> {
    let _ = dotenv();
    env_logger::init();
    let args = Args::from_args();
    let url = args.database_url;
    let db = PgConnection::establish(&url).context("unable to connect database")?;
    match args.command {
        Command::Categories => categories(&db)?,
        Command::AddCategory { label } => add_category(&db, &label)?,
        Command::Questions { page, category } => questions(&db, page, category)?,
        Command::Search { term, page } => search(&db, &term, page)?,
        Command::AddQuestion {
            question,
            answer,
            category,
            difficulty,
        } => add_question(
            &db,
            &NewQuestion {
                question: &question,
                answer: &answer,
                category,
                difficulty,
            },
        )?,
        Command::Delete { id } => delete(&db, id)?,
        Command::Quiz { category, previous } => draw(&db, category, &previous)?,
    }
    Ok(())
}

fn category_map(db: &PgConnection) -> Result<CategoryMap, failure::Error> {
    Ok(format_categories(
        actions::get_categories(db).context("unable to get categories")?,
    ))
}

fn print_page(questions: &[Question], page: i64, categories: &CategoryMap) {
    let current = paginate(questions, page);
    if current.is_empty() {
        println!("No questions on page {}", page);
        return;
    }
    for q in current {
        println!("{}", question_line(q, categories));
    }
    println!("Page {} ({} questions total)", page, questions.len());
}

fn categories(db: &PgConnection) -> Result<(), failure::Error> {
    for (id, label) in category_map(db)? {
        println!("{} ({})", id, label);
    }
    Ok(())
}

fn add_category(db: &PgConnection, label: &str) -> Result<(), failure::Error> {
    let category = actions::insert_category(db, label).context("unable to insert category")?;
    println!("Created category {} ({})", category.id, category.type_);
    Ok(())
}

fn questions(db: &PgConnection, page: i64, category: Option<i32>) -> Result<(), failure::Error> {
    let categories = category_map(db)?;
    let questions = match category {
        Some(id) => {
            if !categories.contains_key(&id) {
                failure::bail!("Category {} not found", id);
            }
            actions::get_questions_in_category(db, id)
        }
        None => actions::get_questions(db),
    }
    .context("unable to get questions")?;
    print_page(&questions, page, &categories);
    Ok(())
}

fn search(db: &PgConnection, term: &str, page: i64) -> Result<(), failure::Error> {
    let categories = category_map(db)?;
    let questions = actions::search_questions(db, term).context("unable to search questions")?;
    if questions.is_empty() {
        println!("No questions match {:?}", term);
        return Ok(());
    }
    print_page(&questions, page, &categories);
    Ok(())
}

fn add_question(db: &PgConnection, question: &NewQuestion<'_>) -> Result<(), failure::Error> {
    let created = actions::insert_question(db, question).context("unable to insert question")?;
    println!("Created question {}", created.id);
    Ok(())
}

fn delete(db: &PgConnection, id: i32) -> Result<(), failure::Error> {
    match actions::delete_question(db, id) {
        Err(diesel::result::Error::NotFound) => failure::bail!("Question {} not found", id),
        other => other.context("unable to delete question")?,
    }
    println!("Deleted question {}", id);
    Ok(())
}

fn draw(db: &PgConnection, category: Option<i32>, previous: &[i32]) -> Result<(), failure::Error> {
    let categories = category_map(db)?;
    let question = quiz::draw(db, category, previous, &mut rand::thread_rng())
        .context("unable to draw quiz question")?;
    match question {
        Some(q) => println!("{}", question_line(&q, &categories)),
        None => println!("No questions left"),
    }
    Ok(())
}
