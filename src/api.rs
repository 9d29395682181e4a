use crate::display::format_categories;
use crate::error::ApiError;
use crate::models::*;
use crate::paginate::paginate;
use crate::{actions, quiz, DbPool};
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpResponse};
use diesel::pg::PgConnection;
use diesel::Connection;

const ALL_CATEGORIES: &str = "ALL";

/// Runs `f` on a pooled connection inside one transaction, off the async executor.
///
/// The transaction commits when `f` returns `Ok` and rolls back otherwise.
pub async fn with_conn<F, T>(pool: web::Data<DbPool>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&PgConnection) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || {
        let conn = pool.get()?;
        conn.transaction(|| f(&conn))
    })
    .await
    .map_err(ApiError::from)
}

#[get("/categories")]
async fn list_categories(
    pool: web::Data<DbPool>,
) -> Result<web::Json<CategoriesResponse>, ApiError> {
    let categories = with_conn(pool, |conn| {
        Ok(format_categories(actions::get_categories(conn)?))
    })
    .await
    .map_err(|_| ApiError::NotFound)?;
    Ok(web::Json(CategoriesResponse { categories }))
}

#[get("/questions")]
async fn list_questions(
    pool: web::Data<DbPool>,
    web::Query(query): web::Query<PageQuery>,
) -> Result<web::Json<QuestionPage>, ApiError> {
    let (questions, categories) = with_conn(pool, |conn| {
        let questions = actions::get_questions(conn)?;
        let categories = format_categories(actions::get_categories(conn)?);
        Ok((questions, categories))
    })
    .await?;
    let page = query.page();
    let current = paginate(&questions, page);
    if current.is_empty() {
        log::debug!("question page {} is empty", page);
        return Err(ApiError::NotFound);
    }
    Ok(web::Json(QuestionPage {
        questions: current.to_vec(),
        total_questions: questions.len(),
        categories,
        current_category: ALL_CATEGORIES.to_string(),
    }))
}

#[delete("/questions/{id}")]
async fn delete_question(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<web::Json<Success>, ApiError> {
    let id = path.into_inner();
    with_conn(pool, move |conn| Ok(actions::delete_question(conn, id)?))
        .await
        .map_err(|e| {
            log::warn!("unable to delete question {}: {}", id, e);
            e.unprocessable()
        })?;
    log::info!("deleted question {}", id);
    Ok(web::Json(Success {
        success: true,
        created: None,
    }))
}

#[post("/questions")]
async fn post_questions(
    pool: web::Data<DbPool>,
    web::Query(query): web::Query<PageQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let body = serde_json::from_slice::<QuestionsBody>(&body).map_err(|e| {
        log::debug!("rejected questions body: {}", e);
        ApiError::Unprocessable
    })?;
    match body {
        QuestionsBody::Search { search_term } => search(pool, search_term, query.page()).await,
        QuestionsBody::Create(question) => create(pool, question).await,
    }
}

async fn search(
    pool: web::Data<DbPool>,
    term: String,
    page: i64,
) -> Result<HttpResponse, ApiError> {
    let questions = with_conn(pool, move |conn| {
        Ok(actions::search_questions(conn, &term)?)
    })
    .await?;
    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(HttpResponse::Ok().json(SearchPage {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category: ALL_CATEGORIES.to_string(),
    }))
}

async fn create(pool: web::Data<DbPool>, question: CreateQuestion) -> Result<HttpResponse, ApiError> {
    let created = with_conn(pool, move |conn| {
        Ok(actions::insert_question(conn, &question.as_insertable())?)
    })
    .await
    .map_err(ApiError::unprocessable)?;
    log::info!("created question {} in category {}", created.id, created.category);
    Ok(HttpResponse::Ok().json(Success {
        success: true,
        created: Some(created.id),
    }))
}

#[get("/categories/{id}/questions")]
async fn list_category_questions(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    web::Query(query): web::Query<PageQuery>,
) -> Result<web::Json<CategoryQuestions>, ApiError> {
    let id = path.into_inner();
    let (category, questions) = with_conn(pool, move |conn| {
        let category = actions::find_category(conn, id)?.ok_or_else(|| {
            log::debug!("category {} not found", id);
            ApiError::NotFound
        })?;
        Ok((category, actions::get_questions_in_category(conn, id)?))
    })
    .await?;
    let page = query.page();
    let current = paginate(&questions, page);
    // An empty category still lists; only a page past a non-empty one is missing.
    if current.is_empty() && !questions.is_empty() {
        log::debug!("page {} of category {} is empty", page, id);
        return Err(ApiError::NotFound);
    }
    Ok(web::Json(CategoryQuestions {
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category: category.type_,
    }))
}

#[post("/quizzes")]
async fn next_quiz_question(
    pool: web::Data<DbPool>,
    web::Json(req): web::Json<QuizRequest>,
) -> Result<web::Json<QuizResponse>, ApiError> {
    let QuizRequest {
        quiz_category,
        previous_questions,
    } = req;
    let previous = previous_questions.clone();
    let question = with_conn(pool, move |conn| {
        Ok(quiz::draw(
            conn,
            quiz_category.id,
            &previous,
            &mut rand::thread_rng(),
        )?)
    })
    .await?;
    Ok(web::Json(QuizResponse {
        previous_questions,
        question,
    }))
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(list_questions)
        .service(delete_question)
        .service(post_questions)
        .service(list_category_questions)
        .service(next_quiz_question);
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _| {
            log::debug!("rejected json body: {}", err);
            ApiError::BadRequest.into()
        })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _| {
        log::debug!("rejected path: {}", err);
        ApiError::NotFound.into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _| {
        log::debug!("rejected query string: {}", err);
        ApiError::BadRequest.into()
    })
}

pub fn cors() -> actix_cors::CorsFactory {
    Cors::new()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .finish()
}
