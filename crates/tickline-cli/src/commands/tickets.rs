use tickline_core::{ComplaintPatch, Ticket, TicketFilter};

use crate::cli::TicketCommands;
use crate::commands::common::{
    format_ticket_lines, parse_date, parse_known_status, require_client_id, ticket_to_list_item,
    ProfileContext, TicketListItem,
};
use crate::error::CliError;

pub async fn run_tickets(
    command: TicketCommands,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let context = ProfileContext::resolve(global_profile, None)?;
    match command {
        TicketCommands::List {
            all,
            status,
            from,
            to,
            json,
        } => run_list(&context, all, status.as_deref(), from.as_deref(), to.as_deref(), json).await,
        TicketCommands::Show { id, json } => run_show(&context, id, json).await,
        TicketCommands::Update {
            id,
            remark,
            status,
            follow_up,
        } => run_update(&context, id, &remark, &status, follow_up.as_deref()).await,
        TicketCommands::Counts { by_client, json } => run_counts(&context, by_client, json).await,
    }
}

async fn run_list(
    context: &ProfileContext,
    all: bool,
    status: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let session = context.require_session()?;
    let client_id = require_client_id(&session)?;
    let client = context.ticket_client()?;

    let tickets = if all {
        client.list_tickets_for_client(client_id).await?
    } else {
        client
            .list_tickets_for_agent(client_id, session.profile.user_id)
            .await?
    };

    let filter = TicketFilter {
        status: status.map(parse_known_status).transpose()?,
        from: from.map(parse_date).transpose()?,
        to: to.map(parse_date).transpose()?,
    };
    let tickets = filter.apply(tickets);

    if as_json {
        let items = tickets
            .iter()
            .map(ticket_to_list_item)
            .collect::<Vec<TicketListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_ticket_lines(&tickets) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_show(context: &ProfileContext, ticket_id: i64, as_json: bool) -> Result<(), CliError> {
    context.require_session()?;
    let ticket = context.ticket_client()?.fetch_ticket(ticket_id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        print_ticket(&ticket);
    }
    Ok(())
}

async fn run_update(
    context: &ProfileContext,
    ticket_id: i64,
    remark: &str,
    status: &str,
    follow_up: Option<&str>,
) -> Result<(), CliError> {
    if remark.trim().is_empty() {
        return Err(CliError::EmptyRemark);
    }
    let status = parse_known_status(status)?;
    let follow_up = follow_up.map(parse_date).transpose()?;

    let session = context.require_session()?;
    let client = context.ticket_client()?;

    // The update endpoint patches complaints individually, so fetch the
    // ticket first and apply the remark/status to every complaint line,
    // the way the agent update flow does.
    let ticket = client.fetch_ticket(ticket_id).await?;
    let patches = ComplaintPatch::for_ticket(&ticket, remark, &status, follow_up.as_ref());

    let ack = client
        .update_ticket(ticket_id, &patches, remark, session.profile.user_id)
        .await?;
    println!("{ack}");
    Ok(())
}

async fn run_counts(
    context: &ProfileContext,
    by_client: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let session = context.require_session()?;
    let client = context.ticket_client()?;

    let counts = if by_client {
        let client_id = require_client_id(&session)?;
        client.count_tickets_by_client(client_id).await?
    } else {
        client.count_tickets(Some(session.profile.user_id)).await?
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    for (status, count) in counts.breakdown() {
        println!(
            "{:<24} {:>5}  ({:.1}%)",
            status.label(),
            count,
            counts.percent(count)
        );
    }
    println!("{:<24} {:>5}", "Total", counts.total());
    Ok(())
}

fn print_ticket(ticket: &Ticket) {
    println!("Ticket #{}", ticket.id);
    println!("  Status:     {}", ticket.status.label());
    if let Some(created) = &ticket.created_at {
        println!("  Created:    {created}");
    }
    if let Some(device) = &ticket.device_id {
        println!("  Device:     {device}");
    }
    if let Some(name) = &ticket.complaintname {
        println!("  Raised by:  {name}");
    }
    if let Some(mobile) = &ticket.complaint_mobile {
        println!("  Contact:    {mobile}");
    }
    if let Some(remark) = &ticket.activity_description {
        println!("  Remark:     {remark}");
    }
    if ticket.complaints.is_empty() {
        println!("  Complaints: none");
        return;
    }
    println!("  Complaints:");
    for complaint in &ticket.complaints {
        let detail = complaint.complaint_detail.as_deref().unwrap_or("(no detail)");
        let product = complaint.product_name.as_deref().unwrap_or("-");
        let follow_up = complaint.followup_date.as_deref().unwrap_or("-");
        println!(
            "    [{}] {} (product: {}, follow-up: {})",
            complaint.id, detail, product, follow_up
        );
    }
}
