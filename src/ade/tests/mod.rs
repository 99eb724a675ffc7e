mod graph_relink;
