use serde_json::json;
use tictactoe_server::{
    Connection, GameClient, InMemoryTransport, Mark, ResetPolicy, SessionController,
    SessionHandle, BOARD_CELLS,
};

async fn join(session: &SessionHandle) -> anyhow::Result<GameClient<InMemoryTransport>> {
    let (server_end, client_end) = InMemoryTransport::pair();
    let connection = Connection::open(Box::new(server_end), session).await?;
    tokio::spawn(connection.run());
    Ok(GameClient::new(client_end))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <index>...", args[0]);
        std::process::exit(1);
    }
    let script = args[1..]
        .iter()
        .map(|a| a.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;

    let (session, _controller) = SessionController::spawn(ResetPolicy::Anyone);
    let mut a = join(&session).await?;
    a.recv_assign().await?;
    a.recv_state().await?;
    let mut b = join(&session).await?;
    b.recv_assign().await?;
    b.recv_state().await?;
    let mut state = a.recv_state().await?;

    // Illegal moves produce no broadcast, so they are filtered here rather
    // than waited on.
    let mut accepted = 0usize;
    for index in script {
        if state.game_over {
            break;
        }
        let legal = usize::try_from(index)
            .ok()
            .filter(|&i| i < BOARD_CELLS)
            .is_some_and(|i| state.board_state[i].is_none());
        if !legal {
            continue;
        }
        match state.current_player {
            Mark::A => a.play(index).await?,
            Mark::B => b.play(index).await?,
        }
        state = a.recv_state().await?;
        b.recv_state().await?;
        accepted += 1;
    }

    let result = json!({
        "board": state.board_state,
        "gameOver": state.game_over,
        "statusText": state.status_text,
        "moves": accepted,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
