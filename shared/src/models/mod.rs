//! Domain model payloads shared between voyago-cloud and the frontend

pub mod agence;
pub mod billet;
pub mod bon_commande;
pub mod caisse;
pub mod client;
pub mod facture;
pub mod fournisseur;
pub mod offre;
pub mod ticket;
pub mod todo;
