// Text menu for the hotel reservation core. Owns all console I/O and input parsing.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use hotel_reservations::{
    BookingRequest, BookingWorkflow, HotelConfig, PaymentMethod, RoomCatalog, RoomLayout,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "HOTEL_CONFIG";

fn main() -> Result<()> {
    init_logging();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => HotelConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => HotelConfig::default(),
    };
    tracing::info!(?config, "starting hotel reservation system");

    let catalog = match config.layout {
        RoomLayout::Fixed => RoomCatalog::standard_layout(),
        RoomLayout::Randomized { seed: Some(seed) } => {
            RoomCatalog::randomized(&mut StdRng::seed_from_u64(seed))
        }
        RoomLayout::Randomized { seed: None } => RoomCatalog::randomized(&mut rand::thread_rng()),
    };
    let workflow = BookingWorkflow::new(catalog, config.policy);

    let stdin = io::stdin();
    let mut menu = Menu::new(workflow, stdin.lock(), io::stdout());
    menu.run()
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}

struct Menu<R, W> {
    workflow: BookingWorkflow,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    fn new(workflow: BookingWorkflow, input: R, out: W) -> Self {
        Self {
            workflow,
            input,
            out,
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\n--- Hotel Reservation System ---")?;
            writeln!(self.out, "1. Search Available Rooms")?;
            writeln!(self.out, "2. Make Reservation")?;
            writeln!(self.out, "3. View Reservations")?;
            writeln!(self.out, "4. Cancel Reservation")?;
            writeln!(self.out, "5. Exit")?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };

            let finished = match choice.as_str() {
                "1" => self.search()?,
                "2" => self.make_reservation()?,
                "3" => self.view_reservations()?,
                "4" => self.cancel_reservation()?,
                "5" => {
                    writeln!(self.out, "Exiting Hotel Reservation System...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.out, "Invalid option. Please try again.")?;
                    Some(())
                }
            };

            // Input closed mid-dialog
            if finished.is_none() {
                return Ok(());
            }
        }
    }

    // Next trimmed line, or None once input is exhausted
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_parsed<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Option<T>,
        hint: &str,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse(&raw) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.out, "Invalid input '{}': {}", raw, hint)?,
            }
        }
    }

    fn prompt_date(&mut self, message: &str) -> Result<Option<NaiveDate>> {
        self.prompt_parsed(
            message,
            |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            "expected a date as YYYY-MM-DD",
        )
    }

    fn prompt_guests(&mut self) -> Result<Option<u32>> {
        self.prompt_parsed(
            "Number of guests: ",
            |s| s.parse::<u32>().ok().filter(|n| *n > 0),
            "expected a positive whole number",
        )
    }

    fn search(&mut self) -> Result<Option<()>> {
        let Some(check_in) = self.prompt_date("Enter check-in date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let Some(check_out) = self.prompt_date("Enter check-out date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let Some(guests) = self.prompt_guests()? else {
            return Ok(None);
        };

        match self.workflow.search(check_in, check_out, guests) {
            Ok(results) if results.is_empty() => {
                writeln!(self.out, "No rooms available matching your criteria.")?;
            }
            Ok(results) => {
                writeln!(self.out, "\nAvailable Rooms:")?;
                for result in results {
                    writeln!(
                        self.out,
                        "Room {} - Type: {}, Price: ${:.2}/night, Max Occupancy: {}",
                        result.room.id,
                        result.room.room_type,
                        result.nightly_rate,
                        result.room.room_type.max_occupancy()
                    )?;
                }
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(Some(()))
    }

    fn make_reservation(&mut self) -> Result<Option<()>> {
        let Some(guest_name) = self.prompt("Enter your name: ")? else {
            return Ok(None);
        };
        let Some(room_id) = self.prompt("Enter room number: ")? else {
            return Ok(None);
        };
        let Some(check_in) = self.prompt_date("Enter check-in date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let Some(check_out) = self.prompt_date("Enter check-out date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let Some(guests) = self.prompt_guests()? else {
            return Ok(None);
        };

        let quote = match self.workflow.quote(BookingRequest {
            room_id,
            guest_name,
            check_in,
            check_out,
            guests,
        }) {
            Ok(quote) => quote,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(Some(()));
            }
        };

        writeln!(self.out, "\nReservation Details:")?;
        writeln!(self.out, "Guest: {}", quote.request().guest_name)?;
        writeln!(self.out, "Room: {} ({})", quote.room().id, quote.room().room_type)?;
        writeln!(self.out, "Check-in: {}", quote.request().check_in)?;
        writeln!(self.out, "Check-out: {}", quote.request().check_out)?;
        writeln!(self.out, "Guests: {}", quote.request().guests)?;
        writeln!(
            self.out,
            "Nights: {} x ${:.2}",
            quote.price().nights, quote.price().nightly_rate
        )?;
        if quote.price().extra_guests > 0 {
            writeln!(
                self.out,
                "Extra guest fee: ${:.2} ({} extra)",
                quote.price().overage_fee, quote.price().extra_guests
            )?;
        }
        writeln!(self.out, "Total Cost: ${:.2}", quote.total())?;

        let Some(answer) = self.prompt("\nConfirm reservation? (Y/N): ")? else {
            return Ok(None);
        };
        if !answer.eq_ignore_ascii_case("y") {
            writeln!(self.out, "Reservation cancelled.")?;
            return Ok(Some(()));
        }

        writeln!(self.out, "\n--- Payment Processing ---")?;
        writeln!(self.out, "Total Amount Due: ${:.2}", quote.total())?;
        writeln!(self.out, "Payment Methods:")?;
        for (i, method) in PaymentMethod::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, method)?;
        }
        let Some(method) = self.prompt_parsed(
            "Select payment method: ",
            |s| {
                s.parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| PaymentMethod::ALL.get(i).copied())
            },
            "expected 1, 2 or 3",
        )?
        else {
            return Ok(None);
        };

        match self.workflow.confirm(quote, method) {
            Ok(reservation) => {
                writeln!(self.out, "Payment Successful!")?;
                writeln!(self.out, "Reservation confirmed!")?;
                writeln!(self.out, "{}", reservation)?;
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(Some(()))
    }

    fn view_reservations(&mut self) -> Result<Option<()>> {
        let reservations = self.workflow.list_reservations();
        if reservations.is_empty() {
            writeln!(self.out, "No reservations found.")?;
            return Ok(Some(()));
        }

        writeln!(self.out, "\n=== CURRENT RESERVATIONS ===")?;
        for reservation in reservations {
            writeln!(self.out, "{}", reservation)?;
            writeln!(self.out, "--------------------")?;
        }
        Ok(Some(()))
    }

    fn cancel_reservation(&mut self) -> Result<Option<()>> {
        let Some(id) = self.prompt("Enter reservation ID: ")? else {
            return Ok(None);
        };
        match self.workflow.cancel(&id) {
            Ok(reservation) => writeln!(
                self.out,
                "Reservation {} cancelled. Refund: ${:.2}",
                reservation.id(),
                reservation.total_cost()
            )?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(Some(()))
    }
}
