#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod collection;

#[cfg(test)]
mod report;
