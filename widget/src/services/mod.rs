pub mod classifier_client;
