//! Issue an access token for local testing: `issue-token <user_id>`.
//!
//! Reads `JWT_SECRET` (and `.env` if present) the same way the server does.

use server::auth::jwt::create_access_token;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let user_id: i64 = std::env::args()
        .nth(1)
        .ok_or("usage: issue-token <user_id>")?
        .parse()?;

    let token = create_access_token(user_id)?;
    println!("{token}");
    Ok(())
}
