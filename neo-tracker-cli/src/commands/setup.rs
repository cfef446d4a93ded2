use neo_tracker::{schema, NeoErr, Session};

pub async fn run_setup_command(session: &Session) -> Result<(), NeoErr> {
    schema::create_tables(session.connection())
        .await
        .map_err(|source| NeoErr::QueryExecution {
            query: "create tables".to_owned(),
            source,
        })
}
