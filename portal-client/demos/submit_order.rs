//! Interactive order submission against a running portal backend
//!
//! Walks the full form flow from the terminal:
//! 1. Load departments and pick one
//! 2. Pick an event (for event-based departments)
//! 3. Fill in the payer fields, optionally apply a promo code
//! 4. Submit and print the provider handoff
//!
//! Run: cargo run --example submit_order

use std::io::{self, Write};
use std::sync::Arc;

use payment_form::traits::PortalShell;
use payment_form::{FormSession, SubmitOutcome};
use portal_client::{PortalClient, PortalConfig};
use shared::models::{PaymentMethod, ResidencyStatus};

struct PrintingShell;

#[async_trait::async_trait]
impl PortalShell for PrintingShell {
    async fn navigate(&self, url: &str) {
        println!("\n→ payment page: {url}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = PortalConfig::from_env();
    println!("\nPortal backend: {}\n", config.base_url);

    let client = Arc::new(PortalClient::new(&config));
    let mut session = FormSession::new(
        client.clone(),
        client.clone(),
        client.clone(),
        Arc::new(PrintingShell),
        config.return_urls(),
    );

    // 1. Department
    let departments = session.load_departments().await?;
    println!("Departments:");
    for (i, department) in departments.iter().enumerate() {
        println!("  [{}] {} ({:?})", i, department.name, department.department_type);
    }
    let index: usize = get_input("Pick a department: ").parse()?;
    let department = departments
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("no such department"))?
        .clone();
    let self_pay = department.is_self_pay();
    session.select_department(department);

    // 2. Event
    if !self_pay {
        let events = session.load_events().await?;
        println!("\nEvents:");
        for (i, event) in events.iter().enumerate() {
            println!("  [{}] {} ({} ₸)", i, event.title, event.price);
        }
        let index: usize = get_input("Pick an event: ").parse()?;
        let event = events
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("no such event"))?
            .clone();
        session.select_event(event);
    }

    // 3. Payer details
    session.set_fullname(get_input("Full name: "));
    session.set_email(get_input("Email: "));
    session.set_cellphone(get_input("Phone: "));

    if get_input("Non-resident? [y/N]: ").eq_ignore_ascii_case("y") {
        session.set_residency(ResidencyStatus::NonResident);
        if session.pricing().usd_fallback_active() {
            println!("USD price not available for this event, using KZT price instead");
        }
    }
    if get_input("Pay with Halyk widget instead of Kaspi? [y/N]: ").eq_ignore_ascii_case("y") {
        session.set_payment_method(PaymentMethod::HalykBank);
    }

    let needs_amount = self_pay || session.event().map(|e| !e.priced).unwrap_or(false);
    if needs_amount {
        session.set_amount(get_input("Amount: ").parse()?);
    }

    let promo = get_input("Promo code (empty to skip): ");
    if !promo.trim().is_empty() {
        session.set_promo_input(promo);
        match session.verify_promo().await {
            Ok(verified) => println!(
                "Promo applied: -{}% → {} {}",
                verified.discount,
                session.pricing().final_price(),
                session.pricing().currency_symbol()
            ),
            Err(err) => println!("{err}"),
        }
    }

    println!(
        "\nTotal: {} {}",
        session.pricing().final_price(),
        session.pricing().currency_symbol()
    );

    // 4. Submit
    match session.submit().await {
        Ok(SubmitOutcome::Redirect { order, .. }) => {
            println!("Order #{} created, redirecting", order.id);
        }
        Ok(SubmitOutcome::Widget(launch)) => {
            println!(
                "Order #{} created, widget terminal {} amount {} {:?}",
                launch.order.id, launch.terminal_id, launch.amount, launch.currency
            );
        }
        Err(err) => println!("Submission failed: {err}"),
    }

    Ok(())
}

fn get_input(prompt: &str) -> String {
    print!("{prompt}");
    io::stdout().flush().unwrap();
    let mut line = String::new();
    io::stdin().read_line(&mut line).unwrap();
    line.trim().to_string()
}
