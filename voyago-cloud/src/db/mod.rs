//! Database access layer

pub mod admins;
pub mod agences;
pub mod audit;
pub mod billets;
pub mod bons_commande;
pub mod caisse;
pub mod clients;
pub mod counters;
pub mod dashboard;
pub mod factures;
pub mod fournisseurs;
pub mod module_requests;
pub mod offres;
pub mod tickets;
pub mod todos;
