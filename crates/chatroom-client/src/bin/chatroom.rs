//! Line-oriented terminal front end.
//!
//! Plain lines are sent as text messages; lines starting with `/` are
//! commands (see `/help`).

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use chatroom_client::composer::PendingImage;
use chatroom_client::events::EventSummary;
use chatroom_client::legacy::LegacyLogin;
use chatroom_client::{AuthState, ChatClient, ClientConfig, ClientEvent, LocalIdentityProvider};
use chatroom_shared::MessageId;

const HELP: &str = "\
Commands:
  /channels                 list channels
  /join <name|id>           switch channel
  /new <name> [| description]
  /list                     show the current channel again
  /gif <term>               search GIFs
  /pick <n>                 send GIF number n
  /image <path> [caption]   send an image
  /discard                  drop a pending image or GIF
  /edit <n> <text>          edit your message number n
  /delete <n>               delete your message number n
  /color <bg> [text]        set your bubble colours
  /avatar <path|url>        set your avatar
  /login <user> <secret>    legacy ChatEngine credential check
  /signout, /signin
  /quit";

/// Front-end state that has no place in the view-model.
#[derive(Default)]
struct Terminal {
    printed: usize,
    pending_delete: Option<MessageId>,
}

#[tokio::main]
async fn main() -> Result<()> {
    chatroom_client::init_tracing();

    let config = ClientConfig::from_env();
    let provider = LocalIdentityProvider::from_config(&config);
    let mut client = ChatClient::open(&config, provider)
        .await
        .context("opening chat client")?;

    if client.sign_in().await.is_err() {
        println!("No profile configured; set CHATROOM_USER_ID to sign in.");
    }

    let mut term = Terminal::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = client.next_event() => {
                let Some(event) = event else { break };
                if let Ok(json) = serde_json::to_string(&EventSummary::from(&event)) {
                    debug!(event = %json, "Client event");
                }
                render_event(&client, &mut term, &event);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut client, &config, &mut term, line.trim_end()).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn render_event(client: &ChatClient, term: &mut Terminal, event: &ClientEvent) {
    match event {
        ClientEvent::AuthChanged(AuthState::SignedIn(identity)) => {
            println!("Signed in as {}", identity.sender_name());
        }
        ClientEvent::AuthChanged(AuthState::SignedOut) => println!("Signed out"),
        ClientEvent::AuthChanged(AuthState::Loading) => {}
        ClientEvent::ChannelsUpdated { selection_changed } => {
            if *selection_changed {
                term.printed = 0;
                match client.selected_channel() {
                    Some(channel) => println!("── #{} ──", channel.name),
                    None => println!("(no channel selected)"),
                }
            }
        }
        ClientEvent::MessagesUpdated(_) => {
            let count = client.state().stream.messages().len();
            // edits and deletes shrink or rewrite history: redraw everything
            if count <= term.printed {
                term.printed = 0;
            }
            print_rows(client, term.printed);
            term.printed = count;
        }
    }
}

fn print_rows(client: &ChatClient, from: usize) {
    for (i, row) in client.rows().iter().enumerate().skip(from) {
        let m = row.message;
        if row.show_header {
            println!("[{}] {}", row.initials, m.sender);
        }
        let mut body = m.text.clone().unwrap_or_default();
        if let Some(url) = &m.image_url {
            body.push_str(&format!(" <image {url}>"));
        }
        if let Some(url) = &m.gif_url {
            body.push_str(&format!(" <gif {url}>"));
        }
        let mark = if row.is_own { "*" } else { " " };
        println!(
            "{mark}{:>3}. {}  {}",
            i + 1,
            m.timestamp.format("%H:%M"),
            body.trim()
        );
    }
}

/// Returns `false` to quit.
async fn handle_line(
    client: &mut ChatClient,
    config: &ClientConfig,
    term: &mut Terminal,
    line: &str,
) -> bool {
    if let Some(id) = term.pending_delete.take() {
        if line.eq_ignore_ascii_case("y") {
            let _ = client.delete_message(id).await;
        } else {
            println!("Kept.");
        }
        return true;
    }

    let Some(command) = line.strip_prefix('/') else {
        client.state_mut().composer.set_text(line);
        let _ = client.send().await;
        return true;
    };
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let rest = rest.trim();

    match name {
        "quit" | "q" => return false,
        "help" => println!("{HELP}"),
        "channels" => {
            let selected = client.state().directory.selected();
            for channel in client.state().directory.channels() {
                let mark = if Some(channel.id) == selected { ">" } else { " " };
                println!("{mark} #{}  {}", channel.name, channel.description);
            }
        }
        "join" => {
            if let Ok(true) = client.select_channel_by_key(rest) {
                term.printed = 0;
                if let Some(channel) = client.selected_channel() {
                    println!("── #{} ──", channel.name);
                }
            }
        }
        "new" => {
            let (name, description) = rest.split_once('|').unwrap_or((rest, ""));
            let _ = client.create_channel(name, description).await;
        }
        "list" => {
            term.printed = client.state().stream.messages().len();
            print_rows(client, 0);
        }
        "gif" => {
            let count = client.search_gifs(rest).await;
            let picker = &client.state().gif_picker;
            if let Some(error) = picker.error {
                println!("{error}");
                client.state_mut().gif_picker.dismiss_error();
            } else {
                for (i, gif) in picker.results.iter().enumerate() {
                    println!("{:>3}. {}  {}", i + 1, gif.title, gif.preview_url);
                }
                debug!(count, "GIF results shown");
            }
        }
        "pick" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => {
                let _ = client.pick_gif(n - 1).await;
            }
            _ => println!("usage: /pick <n>"),
        },
        "image" => {
            let (path, caption) = rest.split_once(' ').unwrap_or((rest, ""));
            match load_image(path).await {
                Ok(image) => {
                    client.state_mut().composer.set_text(caption);
                    client.state_mut().composer.attach_image(image);
                    if client.send().await.is_err() {
                        println!("Image not sent; it stays attached to your next line (/discard drops it).");
                    }
                }
                Err(e) => println!("Could not read image: {e:#}"),
            }
        }
        "discard" => client.state_mut().composer.clear(),
        "edit" => {
            let (n, text) = rest.split_once(' ').unwrap_or((rest, ""));
            match n.parse().ok().and_then(|n| client.message_at(n)) {
                Some(id) => {
                    let _ = client.edit_message(id, text).await;
                }
                None => println!("usage: /edit <n> <text>"),
            }
        }
        "delete" => match rest.parse().ok().and_then(|n| client.message_at(n)) {
            Some(id) => {
                println!("Delete message {rest}? [y/N]");
                term.pending_delete = Some(id);
            }
            None => println!("usage: /delete <n>"),
        },
        "color" | "colour" => {
            let mut parts = rest.split_whitespace();
            match parts.next() {
                Some(bg) => {
                    let _ = client.set_message_colors(bg, parts.next()).await;
                }
                None => println!("usage: /color <bg> [text]"),
            }
        }
        "avatar" => set_avatar(client, rest).await,
        "login" => {
            let (user, secret) = rest.split_once(' ').unwrap_or((rest, ""));
            legacy_login(client, config, user, secret).await;
        }
        "signout" => {
            let _ = client.sign_out().await;
        }
        "signin" => {
            let _ = client.sign_in().await;
        }
        other => println!("Unknown command /{other}, try /help"),
    }
    true
}

async fn load_image(path: &str) -> Result<PendingImage> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {path}"))?;
    Ok(PendingImage::new(path, data)?)
}

async fn set_avatar(client: &mut ChatClient, source: &str) {
    if source.is_empty() {
        println!("usage: /avatar <path|url>");
        return;
    }
    if Path::new(source).is_file() {
        let data = match tokio::fs::read(source).await {
            Ok(data) => data,
            Err(e) => {
                warn!(path = source, error = %e, "Could not read avatar");
                return;
            }
        };
        if client.upload_avatar(source, data).await.is_err() {
            return;
        }
    } else {
        client.open_settings().set_avatar_url(source);
    }
    let _ = client.save_settings().await;
}

async fn legacy_login(client: &mut ChatClient, config: &ClientConfig, user: &str, secret: &str) {
    let login = match LegacyLogin::new(config.chat_engine_project_id.as_deref()) {
        Ok(login) => login,
        Err(e) => {
            println!("{e}");
            return;
        }
    };
    match login.login(user, secret, client.local_storage_mut()).await {
        Ok(()) => println!("Credentials accepted."),
        Err(message) => println!("{message}"),
    }
}
