//! Demo board seed script
//!
//! Wipes and re-seeds the scheduling board with realistic demo data:
//! - 4 venues (two courses, two dining rooms)
//! - 3 contacts (pros and tour organizers)
//! - A weekly recurring golf series starting next week
//! - A biweekly society round and 2 one-off events
//! - A 3-night tour-operator stay with derived breakfasts and dinner
//!   reservations, plus a walk-in dinner reservation
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo
//!
//! Environment variables:
//!   DATABASE_URL - PostgreSQL connection string (required)

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::env;

use fairway_api::models::contact::CreateContactRequest;
use fairway_api::models::hotel_booking::{
    BreakfastDayInput, CreateHotelBookingRequest, ReservationDayInput,
};
use fairway_api::models::program_item::{CreateProgramItemRequest, CreatedProgramItems};
use fairway_api::models::reservation::CreateReservationRequest;
use fairway_api::models::venue::CreateVenueRequest;
use fairway_api::scheduling::dates::{add_days, format_ymd, today_in_operating_tz};
use fairway_api::services::contacts::ContactService;
use fairway_api::services::hotel_bookings::HotelBookingService;
use fairway_api::services::program_items::ProgramItemService;
use fairway_api::services::reservations::ReservationService;
use fairway_api::services::venues::VenueService;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Demo Board ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    // 1. Wipe existing board data. Days go last so the item/reservation
    // cascades have already fired.
    println!("Wiping existing board data...");
    for table in [
        "breakfast_configurations",
        "reservations",
        "program_items",
        "hotel_bookings",
        "days",
        "venues",
        "contacts",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&pool)
            .await
            .with_context(|| format!("Failed to wipe {table}"))?;
    }

    // 2. Venues
    println!("Inserting venues...");
    let venues = [
        ("Championship Course", Some("18 holes")),
        ("Heath Nine", Some("9 holes")),
        ("Clubhouse Restaurant", Some("dining")),
        ("Garden Terrace", Some("dining")),
    ];
    let mut venue_ids = Vec::new();
    for (name, area) in &venues {
        let venue = VenueService::create(
            &pool,
            &CreateVenueRequest {
                name: name.to_string(),
                area: area.map(String::from),
            },
        )
        .await
        .with_context(|| format!("Failed to insert venue {name}"))?;
        venue_ids.push(venue.id);
    }

    // 3. Contacts
    println!("Inserting contacts...");
    let contacts = [
        ("Pieter Claes", Some("+32 470 11 22 33"), Some("pieter@fairwaydemo.be")),
        ("Martine Devos", Some("+32 495 44 55 66"), None),
        ("Linksland Tours", None, Some("bookings@linkslandtours.example")),
    ];
    let mut contact_ids = Vec::new();
    for (name, phone, email) in &contacts {
        let contact = ContactService::create(
            &pool,
            &CreateContactRequest {
                name: name.to_string(),
                phone: phone.map(String::from),
                email: email.map(String::from),
            },
        )
        .await
        .with_context(|| format!("Failed to insert contact {name}"))?;
        contact_ids.push(contact.id);
    }

    let today = today_in_operating_tz();

    // 4. Recurring golf series: every week from next Monday-ish
    println!("Inserting recurring golf series...");
    let series_start = add_days(today, 7);
    let created = ProgramItemService::create(
        &pool,
        &CreateProgramItemRequest {
            date: format_ymd(series_start),
            item_type: "golf".to_string(),
            title: Some("Weekly Members Medal".to_string()),
            description: Some("Stroke play over 18 holes, shotgun start".to_string()),
            confirmed_count: Some(24),
            capacity: Some(36),
            venue_id: Some(venue_ids[0]),
            contact_id: Some(contact_ids[0]),
            start_time: Some("09:00".to_string()),
            end_time: Some("14:00".to_string()),
            notes: None,
            is_tour_operator: false,
            is_recurring: true,
            recurrence_frequency: Some("weekly".to_string()),
        },
    )
    .await
    .context("Failed to create weekly golf series")?;

    let weekly_count = match created {
        CreatedProgramItems::Recurring(recurring) => recurring.count,
        CreatedProgramItems::Single(_) => 1,
    };

    // Biweekly society round on the short course
    let society_created = ProgramItemService::create(
        &pool,
        &CreateProgramItemRequest {
            date: format_ymd(add_days(today, 10)),
            item_type: "golf".to_string(),
            title: Some("Seniors Society".to_string()),
            description: None,
            confirmed_count: Some(12),
            capacity: Some(16),
            venue_id: Some(venue_ids[1]),
            contact_id: Some(contact_ids[1]),
            start_time: Some("10:30".to_string()),
            end_time: None,
            notes: Some("Coffee in the clubhouse afterwards".to_string()),
            is_tour_operator: false,
            is_recurring: true,
            recurrence_frequency: Some("biweekly".to_string()),
        },
    )
    .await
    .context("Failed to create society series")?;

    let society_count = match society_created {
        CreatedProgramItems::Recurring(recurring) => recurring.count,
        CreatedProgramItems::Single(_) => 1,
    };

    // 5. One-off events
    println!("Inserting events...");
    let events = [
        (
            add_days(today, 5),
            "Wine Tasting Evening",
            venue_ids[3],
            "19:00",
            Some(30),
        ),
        (
            add_days(today, 12),
            "Corporate Away Day - Vandenberghe NV",
            venue_ids[2],
            "12:00",
            Some(45),
        ),
    ];
    for (date, title, venue_id, start, capacity) in &events {
        ProgramItemService::create(
            &pool,
            &CreateProgramItemRequest {
                date: format_ymd(*date),
                item_type: "event".to_string(),
                title: Some(title.to_string()),
                description: None,
                confirmed_count: None,
                capacity: *capacity,
                venue_id: Some(*venue_id),
                contact_id: Some(contact_ids[1]),
                start_time: Some(start.to_string()),
                end_time: None,
                notes: None,
                is_tour_operator: false,
                is_recurring: false,
                recurrence_frequency: None,
            },
        )
        .await
        .with_context(|| format!("Failed to create event {title}"))?;
    }

    // 6. Multi-night stay with derived breakfasts and dinner reservations
    println!("Inserting hotel stay with derived rows...");
    let check_in = add_days(today, 14);
    let booking = HotelBookingService::create(
        &pool,
        &CreateHotelBookingRequest {
            guest_name: "Linksland Tours - Munster group".to_string(),
            guest_count: 8,
            check_in_date: format_ymd(check_in),
            check_out_date: format_ymd(add_days(check_in, 3)),
            notes: Some("Two tee times reserved each morning".to_string()),
            is_tour_operator: true,
            breakfasts: vec![
                BreakfastDayInput {
                    day_index: 0,
                    table_breakdown: vec![4, 4],
                    start_time: Some("07:30".to_string()),
                    notes: None,
                },
                BreakfastDayInput {
                    day_index: 1,
                    table_breakdown: vec![4, 4],
                    start_time: Some("07:30".to_string()),
                    notes: None,
                },
                BreakfastDayInput {
                    day_index: 2,
                    table_breakdown: vec![8],
                    start_time: Some("08:00".to_string()),
                    notes: Some("Late start before departure".to_string()),
                },
            ],
            reservations: vec![
                ReservationDayInput {
                    day_index: 0,
                    guest_count: None,
                    start_time: Some("19:30".to_string()),
                    end_time: None,
                    notes: Some("Welcome dinner".to_string()),
                },
                ReservationDayInput {
                    day_index: 2,
                    guest_count: Some(10),
                    start_time: Some("20:00".to_string()),
                    end_time: None,
                    notes: Some("Joined by two local members".to_string()),
                },
            ],
        },
    )
    .await
    .context("Failed to create hotel stay")?;

    // 7. Walk-in dinner reservation, unlinked to any stay
    println!("Inserting walk-in reservation...");
    ReservationService::create(
        &pool,
        &CreateReservationRequest {
            date: format_ymd(add_days(today, 3)),
            guest_name: "De Smet, table of four".to_string(),
            guest_count: 4,
            start_time: Some("18:45".to_string()),
            end_time: None,
            notes: None,
            is_tour_operator: false,
            program_item_id: None,
            table_index: None,
            hotel_booking_id: None,
        },
    )
    .await
    .context("Failed to create walk-in reservation")?;

    println!();
    println!("=== Demo board seeded successfully! ===");
    println!("  Venues       : {}", venues.len());
    println!("  Contacts     : {}", contacts.len());
    println!("  Golf series  : weekly x{weekly_count}, biweekly x{society_count}");
    println!("  Events       : {}", events.len());
    println!(
        "  Hotel stay   : {} ({} -> {})",
        booking.guest_name, booking.check_in_date, booking.check_out_date
    );

    Ok(())
}
