
mod tickets;
