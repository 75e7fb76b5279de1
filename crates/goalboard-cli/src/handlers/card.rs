use crate::cli::{CardAction, CardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use goalboard_domain::{BoardOperations, CardUpdate, FieldUpdate};

pub async fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add { column, title } => {
            if column.is_parking() {
                return Err(anyhow::anyhow!(
                    "Cards cannot be added to the parking lot; move them there instead"
                ));
            }
            let title = non_empty_title(&title).map_err(|e| anyhow::anyhow!(e))?;
            let card = ctx.session.add_card(column, title)?;
            output::output_success(&card);
        }
        CardAction::Get { id } => match ctx.session.get_card(&id) {
            Some(card) => output::output_success(card),
            None => return Err(anyhow::anyhow!("Card not found: {}", id)),
        },
        CardAction::Update(args) => {
            let updates = build_card_update(&args).map_err(|e| anyhow::anyhow!(e))?;
            ctx.session.update_card(args.id.clone(), updates)?;
            match ctx.session.get_card(&args.id) {
                Some(card) => output::output_success(card),
                None => return Err(anyhow::anyhow!("Card not found: {}", args.id)),
            }
        }
        CardAction::Delete { id } => {
            if ctx.session.get_card(&id).is_none() {
                return Err(anyhow::anyhow!("Card not found: {}", id));
            }
            ctx.session.delete_card(id.clone())?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
        CardAction::Move { id, from, to } => {
            let source = match (from, ctx.session.get_card(&id)) {
                (Some(source), _) => source,
                (None, Some(card)) => card.column,
                (None, None) => return Err(anyhow::anyhow!("Card not found: {}", id)),
            };
            ctx.session.move_card(id.clone(), source, to)?;
            match ctx.session.get_card(&id) {
                Some(card) => output::output_success(card),
                None => return Err(anyhow::anyhow!("Card not found: {}", id)),
            }
        }
        CardAction::Reorder { column, ids } => {
            ctx.session.update_card_order(column, ids)?;
            let cards = ctx
                .session
                .columns()
                .iter()
                .find(|c| c.id == column)
                .map(|c| c.cards.clone())
                .unwrap_or_default();
            output::output_list(cards);
        }
        CardAction::Embed { id } => {
            let card = ctx
                .session
                .get_card(&id)
                .ok_or_else(|| anyhow::anyhow!("Card not found: {}", id))?;
            let url = card
                .embed_url()
                .ok_or_else(|| anyhow::anyhow!("Card {} has no valid YouTube link", id))?;
            output::output_success(serde_json::json!({"embedUrl": url}));
        }
    }
    Ok(())
}

fn non_empty_title(title: &str) -> Result<String, String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Card title cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

fn build_card_update(args: &CardUpdateArgs) -> Result<CardUpdate, String> {
    let title = match &args.title {
        Some(t) => Some(non_empty_title(t)?),
        None => None,
    };
    Ok(CardUpdate {
        title,
        description: args.description.clone(),
        youtube_link: if args.clear_youtube_link {
            FieldUpdate::Clear
        } else {
            args.youtube_link
                .clone()
                .map(FieldUpdate::Set)
                .unwrap_or(FieldUpdate::NoChange)
        },
        progress: if args.clear_progress {
            FieldUpdate::Clear
        } else {
            args.progress
                .map(FieldUpdate::Set)
                .unwrap_or(FieldUpdate::NoChange)
        },
    })
}
