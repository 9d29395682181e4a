use crate::actions;
use crate::models::Question;
use diesel::pg::PgConnection;
use diesel::QueryResult;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::HashSet;

/// Picks one question uniformly at random among `candidates` whose id is not in `previous`.
pub fn pick<'a, R>(candidates: &'a [Question], previous: &[i32], rng: &mut R) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    let seen = previous.iter().copied().collect::<HashSet<_>>();
    candidates
        .iter()
        .filter(|q| !seen.contains(&q.id))
        .choose(rng)
}

/// Draws the next quiz question, or `None` once the scope is exhausted.
///
/// A category id that matches no category widens the scope to every
/// category; the web client sends id 0 to mean "all".
pub fn draw<R>(
    conn: &PgConnection,
    category: Option<i32>,
    previous: &[i32],
    rng: &mut R,
) -> QueryResult<Option<Question>>
where
    R: Rng + ?Sized,
{
    let scope = match category {
        Some(id) => actions::find_category(conn, id)?,
        None => None,
    };
    match (&scope, category) {
        (None, Some(id)) => log::debug!("quiz category {} not found, drawing from all", id),
        (Some(c), _) => log::debug!("drawing quiz question from {}", c.type_),
        _ => {}
    }
    let candidates = actions::questions_excluding(conn, scope.map(|c| c.id), previous)?;
    Ok(pick(&candidates, previous, rng).cloned())
}
