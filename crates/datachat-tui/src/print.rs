//! Colored stdout output for the one-shot commands.

use colored::*;

use datachat_core::plain;
use datachat_core::{Node, RenderTree, Role};

pub fn print_tree(tree: &RenderTree) {
    let label = match tree.role {
        Role::User => "You:".bold().cyan(),
        Role::Bot => "Bot:".bold().yellow(),
    };
    println!("{}", label);

    if tree.is_empty() {
        println!("{}", "(no renderable content)".dimmed());
        return;
    }

    for node in &tree.nodes {
        let lines = plain::format(&RenderTree {
            role: tree.role,
            nodes: vec![node.clone()],
        });
        for line in lines {
            match node {
                Node::Explanation(_) => println!("{}", line.italic().dimmed()),
                Node::Empty(_) => println!("{}", line.dimmed()),
                Node::Notice(_) => println!("{}", line.yellow()),
                Node::Chart(_) => println!("{}", line.magenta()),
                Node::Text(_) | Node::Table(_) => println!("{}", line),
            }
        }
    }
}
