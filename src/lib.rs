/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// helper library shared by the simulation: random draws, infection timing,
// scenario grids, name registries, figure decks and parameter files
//
////////////////////////////////////////////////////////////////////////////////////

pub mod data_management;
pub mod infection;
pub mod registry;
pub mod report;
pub mod sampling;
pub mod scenarios;
