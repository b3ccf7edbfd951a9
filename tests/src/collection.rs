mod runner;
mod tasks;
