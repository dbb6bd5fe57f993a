mod cached_tx_store;
