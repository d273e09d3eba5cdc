//! Interactive numbered menu.
//!
//! Reads one choice per line and dispatches to the store until the user
//! picks "Exit" or input ends. Lookup and validation failures are printed
//! and the loop continues.

use std::io::{self, BufRead, Write};

use commerce_core::{UserUpdate, parse_id, parse_price, parse_quantity};
use commerce_sqlite::Store;
use tracing::debug;

use crate::output::{order_line, product_line, user_line};

const MENU: &str = "\
Choose an action:
1. Create User
2. Create Product
3. Create Order
4. View Users
5. View Products
6. View Orders
7. Update User
8. Delete User
9. Exit";

/// A single menu selection, parsed from its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    CreateUser,
    CreateProduct,
    CreateOrder,
    ViewUsers,
    ViewProducts,
    ViewOrders,
    UpdateUser,
    DeleteUser,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CreateUser),
            "2" => Some(Self::CreateProduct),
            "3" => Some(Self::CreateOrder),
            "4" => Some(Self::ViewUsers),
            "5" => Some(Self::ViewProducts),
            "6" => Some(Self::ViewOrders),
            "7" => Some(Self::UpdateUser),
            "8" => Some(Self::DeleteUser),
            "9" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Line-oriented prompt over any reader/writer pair.
struct Prompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Prints `label` and reads one line. Returns `None` at end of input.
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", message.as_ref())
    }
}

/// Runs the menu loop against `store`.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(store: &mut Store, input: R, out: W) -> io::Result<()> {
    let mut prompt = Prompt { input, out };

    loop {
        prompt.say(format!("\n{MENU}"))?;
        let Some(line) = prompt.ask("Enter your choice: ")? else {
            return Ok(());
        };

        let Some(choice) = Choice::parse(&line) else {
            prompt.say("Invalid choice")?;
            continue;
        };
        debug!(?choice, "menu selection");

        if choice == Choice::Exit {
            return Ok(());
        }

        match handle(store, &mut prompt, choice)? {
            Step::Continue(Ok(())) => {}
            Step::Continue(Err(message)) => prompt.say(format!("error: {message}"))?,
            Step::EndOfInput => return Ok(()),
        }
    }
}

enum Step {
    Continue(Result<(), String>),
    EndOfInput,
}

/// Reads one answer, ending the loop if input runs out.
macro_rules! answer {
    ($prompt:expr, $label:expr) => {
        match $prompt.ask($label)? {
            Some(value) => value,
            None => return Ok(Step::EndOfInput),
        }
    };
}

/// Reads one answer and coerces it, reporting coercion failures.
macro_rules! parsed {
    ($prompt:expr, $label:expr, $parse:expr) => {
        match $parse(&answer!($prompt, $label)) {
            Ok(value) => value,
            Err(err) => return Ok(Step::Continue(Err(err.to_string()))),
        }
    };
}

fn handle<R: BufRead, W: Write>(
    store: &mut Store,
    prompt: &mut Prompt<R, W>,
    choice: Choice,
) -> io::Result<Step> {
    let result = match choice {
        Choice::CreateUser => {
            let username = answer!(prompt, "Enter username: ");
            let email = answer!(prompt, "Enter email: ");
            let password = answer!(prompt, "Enter password: ");
            store
                .create_user(&username, &email, &password)
                .map(|user| format!("Created user {}", user_line(&user)))
        }
        Choice::CreateProduct => {
            let name = answer!(prompt, "Enter product name: ");
            let price = parsed!(prompt, "Enter product price: ", parse_price);
            store
                .create_product(&name, price)
                .map(|product| format!("Created product {}", product_line(&product)))
        }
        Choice::CreateOrder => {
            let user_id = parsed!(prompt, "Enter user ID: ", parse_id);
            let product_id = parsed!(prompt, "Enter product ID: ", parse_id);
            let quantity = parsed!(prompt, "Enter quantity: ", parse_quantity);
            store
                .place_order(user_id, product_id, quantity)
                .map(|(order, _)| format!("Created order {}", order.id))
        }
        Choice::ViewUsers => store
            .list_users()
            .map(|users| users.iter().map(user_line).collect::<Vec<_>>().join("\n")),
        Choice::ViewProducts => store.list_products().map(|products| {
            products
                .iter()
                .map(product_line)
                .collect::<Vec<_>>()
                .join("\n")
        }),
        Choice::ViewOrders => store.list_order_summaries().map(|orders| {
            orders
                .iter()
                .map(order_line)
                .collect::<Vec<_>>()
                .join("\n")
        }),
        Choice::UpdateUser => {
            let user_id = parsed!(prompt, "Enter user ID to update: ", parse_id);
            let username = answer!(prompt, "Enter new username (press enter to skip): ");
            let email = answer!(prompt, "Enter new email (press enter to skip): ");
            let password = answer!(prompt, "Enter new password (press enter to skip): ");
            let update = UserUpdate {
                username: Some(username),
                email: Some(email),
                password: Some(password),
            };
            store
                .update_user(user_id, &update)
                .map(|user| format!("Updated user {}", user_line(&user)))
        }
        Choice::DeleteUser => {
            let user_id = parsed!(prompt, "Enter user ID to delete: ", parse_id);
            store
                .delete_user_by_id(user_id)
                .map(|()| format!("Deleted user {user_id}"))
        }
        Choice::Exit => return Ok(Step::Continue(Ok(()))),
    };

    match result {
        Ok(text) => {
            if !text.is_empty() {
                prompt.say(text)?;
            }
            Ok(Step::Continue(Ok(())))
        }
        Err(err) => Ok(Step::Continue(Err(err.to_string()))),
    }
}
