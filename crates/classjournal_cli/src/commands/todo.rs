use super::{print_json, Context};
use clap::{Args, Subcommand};
use classjournal_core::{TodoChange, TodoId, TodoService};

#[derive(Args, Debug)]
pub struct Command {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// List todos of the selected date in order
    List {
        #[clap(long)]
        json: bool,
    },
    /// Add a todo to the selected date
    Add {
        /// Todo text; multiple words are joined with spaces
        #[clap(required = true)]
        content: Vec<String>,
    },
    /// Flip completion of a todo
    Toggle { id: String },
    /// Remove a todo
    Delete { id: String },
    /// Move a todo up within the selected date
    Up { id: String },
    /// Move a todo down within the selected date
    Down { id: String },
}

pub fn handle(command: Command, context: &Context) -> anyhow::Result<()> {
    let mut store = context.open_store()?;
    let selected = context.selected_date(&store)?;
    let mut service = TodoService::new(&mut store);

    let change = match command.action {
        Action::List { json } => {
            let items: Vec<_> = service.view(selected).collect();
            if json {
                return print_json(&items);
            }
            if items.is_empty() {
                println!("{selected}: 등록된 할 일이 없습니다.");
            }
            for (index, item) in items.iter().enumerate() {
                let mark = if item.completed { "x" } else { " " };
                println!("{:>2}. [{mark}] {}  ({})", index + 1, item.content, item.id);
            }
            return Ok(());
        }
        Action::Add { content } => {
            return match service.add(selected, content.join(" "))? {
                Some(id) => {
                    println!("added {id}");
                    Ok(())
                }
                None => {
                    println!("nothing added: content is empty");
                    Ok(())
                }
            };
        }
        Action::Toggle { id } => service.toggle(&TodoId::parse(id)?)?,
        Action::Delete { id } => service.delete(&TodoId::parse(id)?)?,
        Action::Up { id } => service.move_up(selected, &TodoId::parse(id)?)?,
        Action::Down { id } => service.move_down(selected, &TodoId::parse(id)?)?,
    };

    match change {
        TodoChange::Applied => println!("updated"),
        TodoChange::Unchanged => println!("unchanged"),
    }
    Ok(())
}
